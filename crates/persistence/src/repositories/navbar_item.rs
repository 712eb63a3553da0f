//! Repository for navigation bar links.

use domain::models::content::{CreateNavbarItemRequest, UpdateNavbarItemRequest};
use sqlx::PgPool;

use crate::entities::NavbarItemEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, link, display_order, is_active, created_at, updated_at";

/// Repository for navbar items.
#[derive(Clone)]
pub struct NavbarItemRepository {
    pool: PgPool,
}

impl NavbarItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<NavbarItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_navbar_items");
        let result = sqlx::query_as::<_, NavbarItemEntity>(&format!(
            "SELECT {COLUMNS} FROM navbar_items WHERE is_active ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<NavbarItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_navbar_items");
        let result = sqlx::query_as::<_, NavbarItemEntity>(&format!(
            "SELECT {COLUMNS} FROM navbar_items ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<NavbarItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_navbar_item_by_id");
        let result = sqlx::query_as::<_, NavbarItemEntity>(&format!(
            "SELECT {COLUMNS} FROM navbar_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        req: &CreateNavbarItemRequest,
    ) -> Result<NavbarItemEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_navbar_item");
        let result = sqlx::query_as::<_, NavbarItemEntity>(&format!(
            r#"
            INSERT INTO navbar_items (name, link, display_order, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.link)
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
        req: &UpdateNavbarItemRequest,
    ) -> Result<Option<NavbarItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_navbar_item");
        let result = sqlx::query_as::<_, NavbarItemEntity>(&format!(
            r#"
            UPDATE navbar_items
            SET name = COALESCE($2, name),
                link = COALESCE($3, link),
                display_order = COALESCE($4, display_order),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.link.as_deref())
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_navbar_item");
        let result = sqlx::query("DELETE FROM navbar_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
