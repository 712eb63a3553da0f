//! Text-completion client abstraction.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;

/// Speaker of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<PromptMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Failure of an external completion call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("completion request timed out")]
    Timeout,

    #[error("completion transport error: {0}")]
    Transport(String),

    #[error("completion service returned status {0}")]
    Status(u16),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// An external text-completion service.
///
/// A client only exists when a credential is configured; callers hold an
/// `Option` and treat `None` as "no credential".
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the completion text, trimmed.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// Completion client that replays canned replies and records requests.
///
/// Used in development and tests. Once the script runs out every call
/// fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedCompletionClient {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletionClient {
    pub fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Transport("script exhausted".to_string())))
            .map(|reply| reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![PromptMessage::user("hi")],
            max_tokens: 10,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn test_scripted_replays_in_order() {
        let client = ScriptedCompletionClient::new(vec![
            Ok("  yes ".to_string()),
            Err(CompletionError::Timeout),
        ]);
        assert_eq!(client.complete(request()).await, Ok("yes".to_string()));
        assert_eq!(client.complete(request()).await, Err(CompletionError::Timeout));
        assert!(matches!(
            client.complete(request()).await,
            Err(CompletionError::Transport(_))
        ));
        assert_eq!(client.calls(), 3);
    }

    #[test]
    fn test_prompt_message_serializes_role() {
        let json = serde_json::to_value(PromptMessage::system("rules")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "rules"}));
    }
}
