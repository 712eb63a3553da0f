//! Visitor session cookie middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::app::AppState;

/// Visitor session for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorSession {
    pub id: Uuid,
    /// True when the cookie is set by this response rather than sent by
    /// the client.
    pub issued: bool,
}

/// Reads the session cookie, issuing a new id when it is missing or not a
/// UUID. The session row itself is created on the first cart write.
pub async fn visitor_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let existing = state.cookies.session_id(req.headers());
    let id = existing.unwrap_or_else(Uuid::new_v4);

    req.extensions_mut().insert(VisitorSession {
        id,
        issued: existing.is_none(),
    });
    let mut response = next.run(req).await;

    if existing.is_none() {
        tracing::debug!(session_id = %id, "Issued visitor session");
        state.cookies.add_session_cookie(response.headers_mut(), id);
    }

    response
}
