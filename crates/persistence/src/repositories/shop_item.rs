//! Repository for shop items.

use domain::models::shop::{CreateShopItemRequest, UpdateShopItemRequest};
use sqlx::PgPool;

use crate::entities::ShopItemEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, price_cents, description, image_url, category, in_stock, \
                       display_order, is_active, created_at, updated_at";

/// Repository for shop item records.
#[derive(Clone)]
pub struct ShopItemRepository {
    pool: PgPool,
}

impl ShopItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active items in display order. Filtering and sorting for the shop
    /// page happen on this list.
    pub async fn list_active(&self) -> Result<Vec<ShopItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_shop_items");
        let result = sqlx::query_as::<_, ShopItemEntity>(&format!(
            "SELECT {COLUMNS} FROM shop_items WHERE is_active ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<ShopItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_shop_items");
        let result = sqlx::query_as::<_, ShopItemEntity>(&format!(
            "SELECT {COLUMNS} FROM shop_items ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ShopItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_shop_item_by_id");
        let result = sqlx::query_as::<_, ShopItemEntity>(&format!(
            "SELECT {COLUMNS} FROM shop_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds an item that is visible in the shop.
    pub async fn find_active_by_id(&self, id: i64) -> Result<Option<ShopItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_shop_item_by_id");
        let result = sqlx::query_as::<_, ShopItemEntity>(&format!(
            "SELECT {COLUMNS} FROM shop_items WHERE id = $1 AND is_active"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active items among the given ids, used to resolve cart lines.
    pub async fn find_active_by_ids(
        &self,
        ids: &[i64],
    ) -> Result<Vec<ShopItemEntity>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("find_active_shop_items_by_ids");
        let result = sqlx::query_as::<_, ShopItemEntity>(&format!(
            "SELECT {COLUMNS} FROM shop_items WHERE id = ANY($1) AND is_active ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(&self, req: &CreateShopItemRequest) -> Result<ShopItemEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_shop_item");
        let result = sqlx::query_as::<_, ShopItemEntity>(&format!(
            r#"
            INSERT INTO shop_items
                (name, price_cents, description, image_url, category, in_stock,
                 display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.price.cents())
        .bind(&req.description)
        .bind(req.image_url.as_deref())
        .bind(&req.category)
        .bind(req.in_stock)
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
        req: &UpdateShopItemRequest,
    ) -> Result<Option<ShopItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_shop_item");
        let result = sqlx::query_as::<_, ShopItemEntity>(&format!(
            r#"
            UPDATE shop_items
            SET name = COALESCE($2, name),
                price_cents = COALESCE($3, price_cents),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url),
                category = COALESCE($6, category),
                in_stock = COALESCE($7, in_stock),
                display_order = COALESCE($8, display_order),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.price.map(|p| p.cents()))
        .bind(req.description.as_deref())
        .bind(req.image_url.as_deref())
        .bind(req.category.as_deref())
        .bind(req.in_stock)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_shop_item");
        let result = sqlx::query("DELETE FROM shop_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
