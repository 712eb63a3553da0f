//! Per-client rate limiting for the chatbot endpoint.
//!
//! Clients are keyed by authenticated user, then a visitor session the
//! client sent back, then peer address, then a shared `anonymous` bucket.
//! A session cookie issued on the current request does not count, so
//! clients that drop cookies share their address bucket.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
};

use crate::app::AppState;
use crate::middleware::user_auth::UserAuth;
use crate::middleware::visitor_session::VisitorSession;

/// Bucket shared by callers with no token, no returning session and no
/// known peer address.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// Keyed limiter over client keys.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<String>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Returns `None` for a limit of 0, which disables limiting.
    pub fn new(rate_limit_per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(rate_limit_per_minute)?;
        Some(Self {
            limiter: GovRateLimiter::keyed(Quota::per_minute(per_minute)),
            rate_limit_per_minute,
        })
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.rate_limit_per_minute
    }

    /// `Err(retry_after_secs)` when the client is over its quota.
    pub fn check(&self, client: &str) -> Result<(), u64> {
        self.limiter
            .check_key(&client.to_string())
            .map_err(|not_until| {
                not_until
                    .wait_time_from(DefaultClock::default().now())
                    .as_secs()
                    .max(1)
            })
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Drops clients whose quota has fully replenished. Returns how many
    /// were removed.
    pub fn prune(&self) -> usize {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        before.saturating_sub(self.limiter.len())
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("clients", &self.limiter.len())
            .finish()
    }
}

/// Rate-limit key for a request.
pub fn client_key(
    user: Option<&UserAuth>,
    session: Option<&VisitorSession>,
    peer: Option<IpAddr>,
) -> String {
    if let Some(user) = user {
        return format!("user:{}", user.user_id);
    }
    if let Some(session) = session.filter(|s| !s.issued) {
        return format!("session:{}", session.id);
    }
    match peer {
        Some(ip) => format!("ip:{}", ip),
        None => ANONYMOUS_CLIENT.to_string(),
    }
}

/// Must run inside the user-auth and visitor-session layers so their
/// extensions are present.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(limiter) = state.rate_limiter.as_deref() {
        let key = client_key(
            req.extensions().get::<UserAuth>(),
            req.extensions().get::<VisitorSession>(),
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip()),
        );
        if let Err(retry_after) = limiter.check(&key) {
            tracing::debug!(client = %key, retry_after, "Chat request rate limited");
            return rate_limited_response(limiter.rate_limit_per_minute(), retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "error": "rate_limited",
        "message": format!("Rate limit of {} requests/minute exceeded", limit),
        "retry_after": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
