//! Repository for gym events.

use domain::models::content::{CreateEventRequest, UpdateEventRequest};
use sqlx::PgPool;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, title, date, description, location, price_cents, image_url, \
                       display_order, is_active, created_at, updated_at";

/// Repository for event records.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {COLUMNS} FROM events WHERE is_active ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {COLUMNS} FROM events ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            INSERT INTO events
                (title, date, description, location, price_cents, image_url,
                 display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.title)
        .bind(&req.date)
        .bind(&req.description)
        .bind(&req.location)
        .bind(req.price.map(|p| p.cents()))
        .bind(req.image_url.as_deref())
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
        req: &UpdateEventRequest,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                date = COALESCE($3, date),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                price_cents = COALESCE($6, price_cents),
                image_url = COALESCE($7, image_url),
                display_order = COALESCE($8, display_order),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.title.as_deref())
        .bind(req.date.as_deref())
        .bind(req.description.as_deref())
        .bind(req.location.as_deref())
        .bind(req.price.map(|p| p.cents()))
        .bind(req.image_url.as_deref())
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
