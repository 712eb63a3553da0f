//! Custom Axum extractors.

pub mod api_key;
pub mod json;
pub mod user_auth;
pub mod visitor_session;

pub use api_key::ApiKeyAuth;
pub use json::ApiJson;
pub use user_auth::{OptionalUserAuth, UserAuth};
pub use visitor_session::VisitorSession;
