//! Repository for anonymous visitor sessions and their carts.

use domain::models::cart::Cart;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::VisitorSessionEntity;
use crate::metrics::QueryTimer;

use super::to_json_column;

/// Repository for the `visitor_sessions` table.
#[derive(Clone)]
pub struct VisitorSessionRepository {
    pool: PgPool,
}

impl VisitorSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<VisitorSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_visitor_session");
        let result = sqlx::query_as::<_, VisitorSessionEntity>(
            "SELECT id, cart, created_at, last_seen_at FROM visitor_sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Loads the cart for a session. An unknown session has an empty cart.
    pub async fn load_cart(&self, id: Uuid) -> Result<Cart, sqlx::Error> {
        Ok(self
            .find(id)
            .await?
            .map(|session| session.cart())
            .unwrap_or_default())
    }

    /// Writes the cart, creating the session row if needed, and marks the
    /// session as seen. Concurrent writers for one session: last write wins.
    pub async fn save_cart(&self, id: Uuid, cart: &Cart) -> Result<(), sqlx::Error> {
        let cart = to_json_column(cart, "cart")?;
        let timer = QueryTimer::new("save_visitor_cart");
        let result = sqlx::query(
            r#"
            INSERT INTO visitor_sessions (id, cart, created_at, last_seen_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE
            SET cart = EXCLUDED.cart, last_seen_at = NOW()
            "#,
        )
        .bind(id)
        .bind(cart)
        .execute(&self.pool)
        .await;
        timer.record();
        result?;
        Ok(())
    }

    /// Deletes sessions not seen within `idle_hours`. Returns the number removed.
    pub async fn delete_idle(&self, idle_hours: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_idle_visitor_sessions");
        let result = sqlx::query(
            "DELETE FROM visitor_sessions WHERE last_seen_at < NOW() - make_interval(hours => $1)",
        )
        .bind(idle_hours as i32)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
