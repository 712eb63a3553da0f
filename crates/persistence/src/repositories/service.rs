//! Repository for the services offered on the site.

use domain::models::content::{CreateServiceRequest, UpdateServiceRequest};
use sqlx::PgPool;

use crate::entities::ServiceEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, name, link, description, display_order, is_active, created_at, updated_at";

/// Repository for service records.
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active services in display order.
    pub async fn list_active(&self) -> Result<Vec<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_services");
        let result = sqlx::query_as::<_, ServiceEntity>(&format!(
            "SELECT {COLUMNS} FROM services WHERE is_active ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All services, including inactive ones.
    pub async fn list_all(&self) -> Result<Vec<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_services");
        let result = sqlx::query_as::<_, ServiceEntity>(&format!(
            "SELECT {COLUMNS} FROM services ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_service_by_id");
        let result = sqlx::query_as::<_, ServiceEntity>(&format!(
            "SELECT {COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, req: &CreateServiceRequest) -> Result<ServiceEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_service");
        let result = sqlx::query_as::<_, ServiceEntity>(&format!(
            r#"
            INSERT INTO services (name, link, description, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.link)
        .bind(&req.description)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Applies a partial update. Returns `None` if the record does not exist.
    pub async fn update(
        &self,
        id: i64,
        req: &UpdateServiceRequest,
    ) -> Result<Option<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_service");
        let result = sqlx::query_as::<_, ServiceEntity>(&format!(
            r#"
            UPDATE services
            SET name = COALESCE($2, name),
                link = COALESCE($3, link),
                description = COALESCE($4, description),
                display_order = COALESCE($5, display_order),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.link.as_deref())
        .bind(req.description.as_deref())
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deletes a service. Returns the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_service");
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
