//! Chat exchange entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::chat::{ChatExchange, ResolutionSource};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the chat_exchanges table.
#[derive(Debug, Clone, FromRow)]
pub struct ChatExchangeEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub session_id: Option<Uuid>,
    pub user_message: String,
    pub bot_response: String,
    pub in_domain: bool,
    pub resolved_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatExchangeEntity> for ChatExchange {
    fn from(e: ChatExchangeEntity) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            session_id: e.session_id,
            user_message: e.user_message,
            bot_response: e.bot_response,
            in_domain: e.in_domain,
            resolved_by: e
                .resolved_by
                .parse::<ResolutionSource>()
                .unwrap_or(ResolutionSource::Ai),
            created_at: e.created_at,
        }
    }
}
