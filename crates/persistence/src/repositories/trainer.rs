//! Repository for trainer profiles.

use domain::models::content::{CreateTrainerRequest, UpdateTrainerRequest};
use sqlx::PgPool;

use crate::entities::TrainerEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, role, bio, image_url, experience, display_order, is_active, \
                       created_at, updated_at";

/// Repository for trainer records.
#[derive(Clone)]
pub struct TrainerRepository {
    pool: PgPool,
}

impl TrainerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<TrainerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_trainers");
        let result = sqlx::query_as::<_, TrainerEntity>(&format!(
            "SELECT {COLUMNS} FROM trainers WHERE is_active ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<TrainerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_trainers");
        let result = sqlx::query_as::<_, TrainerEntity>(&format!(
            "SELECT {COLUMNS} FROM trainers ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<TrainerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_trainer_by_id");
        let result = sqlx::query_as::<_, TrainerEntity>(&format!(
            "SELECT {COLUMNS} FROM trainers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, req: &CreateTrainerRequest) -> Result<TrainerEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_trainer");
        let result = sqlx::query_as::<_, TrainerEntity>(&format!(
            r#"
            INSERT INTO trainers (name, role, bio, image_url, experience, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.role)
        .bind(&req.bio)
        .bind(req.image_url.as_deref())
        .bind(&req.experience)
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
        req: &UpdateTrainerRequest,
    ) -> Result<Option<TrainerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_trainer");
        let result = sqlx::query_as::<_, TrainerEntity>(&format!(
            r#"
            UPDATE trainers
            SET name = COALESCE($2, name),
                role = COALESCE($3, role),
                bio = COALESCE($4, bio),
                image_url = COALESCE($5, image_url),
                experience = COALESCE($6, experience),
                display_order = COALESCE($7, display_order),
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.role.as_deref())
        .bind(req.bio.as_deref())
        .bind(req.image_url.as_deref())
        .bind(req.experience.as_deref())
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_trainer");
        let result = sqlx::query("DELETE FROM trainers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
