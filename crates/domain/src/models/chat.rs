//! Chat exchange log model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stage that produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    OutOfDomain,
    Faq,
    LiveData,
    Ai,
}

impl ResolutionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionSource::OutOfDomain => "out_of_domain",
            ResolutionSource::Faq => "faq",
            ResolutionSource::LiveData => "live_data",
            ResolutionSource::Ai => "ai",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResolutionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "out_of_domain" => Ok(ResolutionSource::OutOfDomain),
            "faq" => Ok(ResolutionSource::Faq),
            "live_data" => Ok(ResolutionSource::LiveData),
            "ai" => Ok(ResolutionSource::Ai),
            other => Err(format!("Unknown resolution source: {}", other)),
        }
    }
}

/// A logged chat exchange. Immutable once written.
#[derive(Debug, Clone, Serialize)]
pub struct ChatExchange {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub session_id: Option<Uuid>,
    pub user_message: String,
    pub bot_response: String,
    pub in_domain: bool,
    pub resolved_by: ResolutionSource,
    pub created_at: DateTime<Utc>,
}

/// Data for appending an exchange to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatExchange {
    pub user_id: Option<Uuid>,
    pub session_id: Option<Uuid>,
    pub user_message: String,
    pub bot_response: String,
    pub in_domain: bool,
    pub resolved_by: ResolutionSource,
}

/// Chat request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Accepted for compatibility; only honored when it matches the
    /// authenticated caller.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// One page of the exchange log, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ChatExchangePage {
    pub data: Vec<ChatExchange>,
    pub next_cursor: Option<String>,
}
