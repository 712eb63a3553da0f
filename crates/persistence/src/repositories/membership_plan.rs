//! Repository for membership plans.

use domain::models::membership::{CreateMembershipPlanRequest, UpdateMembershipPlanRequest};
use sqlx::PgPool;

use crate::entities::MembershipPlanEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, plan_type, price_cents, original_price_cents, duration, \
                       custom_duration, description, features, hot_sale_price_cents, \
                       discount_percentage, is_popular, is_hot_sale, display_order, is_active, \
                       created_at, updated_at";

/// Repository for membership plan records. Listings sort by display order,
/// then name.
#[derive(Clone)]
pub struct MembershipPlanRepository {
    pool: PgPool,
}

impl MembershipPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<MembershipPlanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_membership_plans");
        let result = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            "SELECT {COLUMNS} FROM membership_plans WHERE is_active ORDER BY display_order, name"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<MembershipPlanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_membership_plans");
        let result = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            "SELECT {COLUMNS} FROM membership_plans ORDER BY display_order, name"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<MembershipPlanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_membership_plan_by_id");
        let result = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            "SELECT {COLUMNS} FROM membership_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds the first active plan whose name matches case-insensitively.
    pub async fn find_active_by_name(
        &self,
        name: &str,
    ) -> Result<Option<MembershipPlanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_membership_plan_by_name");
        let result = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            r#"
            SELECT {COLUMNS} FROM membership_plans
            WHERE LOWER(name) = LOWER($1) AND is_active
            ORDER BY display_order, id
            LIMIT 1
            "#
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        req: &CreateMembershipPlanRequest,
    ) -> Result<MembershipPlanEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_membership_plan");
        let result = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            r#"
            INSERT INTO membership_plans
                (name, plan_type, price_cents, original_price_cents, duration, custom_duration,
                 description, features, hot_sale_price_cents, discount_percentage, is_popular,
                 is_hot_sale, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.plan_type.as_str())
        .bind(req.price.cents())
        .bind(req.original_price.map(|p| p.cents()))
        .bind(req.duration.as_str())
        .bind(&req.custom_duration)
        .bind(&req.description)
        .bind(&req.features)
        .bind(req.hot_sale_price.map(|p| p.cents()))
        .bind(req.discount_percentage)
        .bind(req.is_popular)
        .bind(req.is_hot_sale)
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
        req: &UpdateMembershipPlanRequest,
    ) -> Result<Option<MembershipPlanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_membership_plan");
        let result = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            r#"
            UPDATE membership_plans
            SET name = COALESCE($2, name),
                plan_type = COALESCE($3, plan_type),
                price_cents = COALESCE($4, price_cents),
                original_price_cents = COALESCE($5, original_price_cents),
                duration = COALESCE($6, duration),
                custom_duration = COALESCE($7, custom_duration),
                description = COALESCE($8, description),
                features = COALESCE($9, features),
                hot_sale_price_cents = COALESCE($10, hot_sale_price_cents),
                discount_percentage = COALESCE($11, discount_percentage),
                is_popular = COALESCE($12, is_popular),
                is_hot_sale = COALESCE($13, is_hot_sale),
                display_order = COALESCE($14, display_order),
                is_active = COALESCE($15, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.plan_type.map(|t| t.as_str()))
        .bind(req.price.map(|p| p.cents()))
        .bind(req.original_price.map(|p| p.cents()))
        .bind(req.duration.map(|d| d.as_str()))
        .bind(req.custom_duration.as_deref())
        .bind(req.description.as_deref())
        .bind(req.features.as_deref())
        .bind(req.hot_sale_price.map(|p| p.cents()))
        .bind(req.discount_percentage)
        .bind(req.is_popular)
        .bind(req.is_hot_sale)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_membership_plan");
        let result = sqlx::query("DELETE FROM membership_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
