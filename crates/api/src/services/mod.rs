//! Application services: external integrations and startup tasks.

pub mod admin_bootstrap;
pub mod completion;
pub mod cookies;

pub use admin_bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
pub use completion::OpenAiCompletionClient;
pub use cookies::CookieHelper;
