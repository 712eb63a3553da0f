//! Repository for the chatbot exchange log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::chat::NewChatExchange;
use domain::services::chatbot::{DataAccessError, ExchangeLog};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ChatExchangeEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, user_id, session_id, user_message, bot_response, in_domain, resolved_by, created_at";

/// Repository for chat exchanges. The log is append-only apart from
/// retention cleanup.
#[derive(Clone)]
pub struct ChatExchangeRepository {
    pool: PgPool,
}

impl ChatExchangeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        exchange: &NewChatExchange,
    ) -> Result<ChatExchangeEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_chat_exchange");
        let result = sqlx::query_as::<_, ChatExchangeEntity>(&format!(
            r#"
            INSERT INTO chat_exchanges
                (user_id, session_id, user_message, bot_response, in_domain, resolved_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(exchange.user_id)
        .bind(exchange.session_id)
        .bind(&exchange.user_message)
        .bind(&exchange.bot_response)
        .bind(exchange.in_domain)
        .bind(exchange.resolved_by.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lists exchanges newest first.
    ///
    /// `after` is the `(created_at, id)` of the last row of the previous page.
    /// Fetches `limit + 1` rows so the caller can tell whether another page exists.
    pub async fn list_page(
        &self,
        after: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<ChatExchangeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_chat_exchanges");
        let (cursor_ts, cursor_id) = match after {
            Some((ts, id)) => (Some(ts), Some(id)),
            None => (None, None),
        };
        let result = sqlx::query_as::<_, ChatExchangeEntity>(&format!(
            r#"
            SELECT {COLUMNS} FROM chat_exchanges
            WHERE ($1::timestamptz IS NULL OR (created_at, id) < ($1, $2))
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#
        ))
        .bind(cursor_ts)
        .bind(cursor_id)
        .bind(limit + 1)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deletes exchanges older than `days`. Returns the number removed.
    pub async fn delete_older_than(&self, days: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_old_chat_exchanges");
        let result = sqlx::query(
            "DELETE FROM chat_exchanges WHERE created_at < NOW() - make_interval(days => $1)",
        )
        .bind(days as i32)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}

#[async_trait]
impl ExchangeLog for ChatExchangeRepository {
    async fn append(&self, exchange: NewChatExchange) -> Result<(), DataAccessError> {
        self.insert(&exchange)
            .await
            .map(|_| ())
            .map_err(|e| DataAccessError::Backend(e.to_string()))
    }
}
