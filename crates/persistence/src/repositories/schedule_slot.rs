//! Repository for training schedule slots.

use domain::models::schedule::{CreateScheduleSlotRequest, UpdateScheduleSlotRequest};
use sqlx::PgPool;

use crate::entities::ScheduleSlotEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, day, time_slot, class_type, coach, level, available_slots, \
                       display_order, is_active, created_at, updated_at";

/// Repository for schedule slots.
///
/// `day` is stored as 1 (Monday) to 7 (Sunday), so ordering by the column
/// yields weekday order.
#[derive(Clone)]
pub struct ScheduleSlotRepository {
    pool: PgPool,
}

impl ScheduleSlotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active slots, Monday first, then display order within a day.
    pub async fn list_active(&self) -> Result<Vec<ScheduleSlotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_schedule_slots");
        let result = sqlx::query_as::<_, ScheduleSlotEntity>(&format!(
            "SELECT {COLUMNS} FROM schedule_slots WHERE is_active ORDER BY day, display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<ScheduleSlotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_schedule_slots");
        let result = sqlx::query_as::<_, ScheduleSlotEntity>(&format!(
            "SELECT {COLUMNS} FROM schedule_slots ORDER BY day, display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ScheduleSlotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_schedule_slot_by_id");
        let result = sqlx::query_as::<_, ScheduleSlotEntity>(&format!(
            "SELECT {COLUMNS} FROM schedule_slots WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        req: &CreateScheduleSlotRequest,
    ) -> Result<ScheduleSlotEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_schedule_slot");
        let result = sqlx::query_as::<_, ScheduleSlotEntity>(&format!(
            r#"
            INSERT INTO schedule_slots
                (day, time_slot, class_type, coach, level, available_slots,
                 display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(req.day.index())
        .bind(&req.time_slot)
        .bind(&req.class_type)
        .bind(&req.coach)
        .bind(&req.level)
        .bind(req.available_slots)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        req: &UpdateScheduleSlotRequest,
    ) -> Result<Option<ScheduleSlotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_schedule_slot");
        let result = sqlx::query_as::<_, ScheduleSlotEntity>(&format!(
            r#"
            UPDATE schedule_slots
            SET day = COALESCE($2, day),
                time_slot = COALESCE($3, time_slot),
                class_type = COALESCE($4, class_type),
                coach = COALESCE($5, coach),
                level = COALESCE($6, level),
                available_slots = COALESCE($7, available_slots),
                display_order = COALESCE($8, display_order),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.day.map(|d| d.index()))
        .bind(req.time_slot.as_deref())
        .bind(req.class_type.as_deref())
        .bind(req.coach.as_deref())
        .bind(req.level.as_deref())
        .bind(req.available_slots)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_schedule_slot");
        let result = sqlx::query("DELETE FROM schedule_slots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
