//! Visitor session extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::error::ApiError;
pub use crate::middleware::visitor_session::VisitorSession;

#[async_trait]
impl FromRequestParts<AppState> for VisitorSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VisitorSession>()
            .copied()
            .ok_or_else(|| ApiError::Internal("Visitor session layer not installed".to_string()))
    }
}
