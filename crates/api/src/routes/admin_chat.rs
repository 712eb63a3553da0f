//! Admin view of the chatbot exchange log.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use domain::models::chat::{ChatExchange, ChatExchangePage};
use persistence::repositories::ChatExchangeRepository;
use serde::Deserialize;
use shared::pagination::{clamp_page_size, decode_cursor, encode_cursor};

use crate::app::AppState;
use crate::error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/chat-exchanges", get(list_exchanges))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListExchangesQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Newest first.
///
/// GET /api/v1/admin/chat-exchanges?cursor=&limit=
async fn list_exchanges(
    State(state): State<AppState>,
    Query(query): Query<ListExchangesQuery>,
) -> Result<Json<ChatExchangePage>, ApiError> {
    let limit = clamp_page_size(query.limit);
    let after = query
        .cursor
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(decode_cursor)
        .transpose()?;

    let rows: Vec<ChatExchange> = ChatExchangeRepository::new(state.pool.clone())
        .list_page(after, limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(into_page(rows, limit)))
}

/// `rows` holds up to `limit + 1` entries; the extra one only signals that
/// another page exists.
fn into_page(mut rows: Vec<ChatExchange>, limit: i64) -> ChatExchangePage {
    let limit = limit.max(0) as usize;
    let has_more = rows.len() > limit;
    rows.truncate(limit);

    let next_cursor = if has_more {
        rows.last().map(|last| encode_cursor(last.created_at, last.id))
    } else {
        None
    };

    ChatExchangePage {
        data: rows,
        next_cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::models::chat::ResolutionSource;
    use uuid::Uuid;

    fn exchanges(count: usize) -> Vec<ChatExchange> {
        let now = Utc::now();
        (0..count)
            .map(|i| ChatExchange {
                id: Uuid::new_v4(),
                user_id: None,
                session_id: Some(Uuid::new_v4()),
                user_message: format!("question {}", i),
                bot_response: "answer".to_string(),
                in_domain: true,
                resolved_by: ResolutionSource::Faq,
                created_at: now - Duration::seconds(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_last_page_has_no_cursor() {
        let page = into_page(exchanges(3), 5);
        assert_eq!(page.data.len(), 3);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_extra_row_yields_cursor_of_last_kept_row() {
        let rows = exchanges(4);
        let third = (rows[2].created_at, rows[2].id);

        let page = into_page(rows, 3);

        assert_eq!(page.data.len(), 3);
        let cursor = page.next_cursor.expect("cursor");
        let (ts, id) = decode_cursor(&cursor).unwrap();
        assert_eq!(id, third.1);
        assert_eq!(ts.timestamp_micros(), third.0.timestamp_micros());
    }

    #[test]
    fn test_query_defaults() {
        let query: ListExchangesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(clamp_page_size(query.limit), shared::pagination::DEFAULT_PAGE_SIZE);
        assert!(query.cursor.is_none());
    }
}
