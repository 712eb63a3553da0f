//! Visitor session entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::cart::Cart;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the visitor_sessions table.
#[derive(Debug, Clone, FromRow)]
pub struct VisitorSessionEntity {
    pub id: Uuid,
    pub cart: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl VisitorSessionEntity {
    /// Decodes the stored cart. Unreadable carts are treated as empty.
    pub fn cart(&self) -> Cart {
        serde_json::from_value(self.cart.clone()).unwrap_or_default()
    }
}
