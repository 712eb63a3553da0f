//! Free-text answers from the completion service.

use std::sync::Arc;

use super::completion::{CompletionClient, CompletionRequest, PromptMessage};

/// Reply when no completion credential is configured.
pub const NO_CREDENTIAL_REPLY: &str = "I'd love to help with boxing advice! For detailed AI-powered responses, please configure the API key. Meanwhile, you can ask about our training schedules, membership plans, or boxing techniques! 🥊";

/// Reply when the completion service fails or returns nothing.
pub const SERVICE_FAILURE_REPLY: &str = "I'm having trouble connecting to my AI service right now. Please try again later or ask about our training schedules and membership plans! 🥊";

const PERSONA_PROMPT: &str = "You are BoxingBot, an expert boxing assistant for Boxing Academy. \
Only provide information about boxing training, techniques, equipment, and fitness. \
If asked about non-boxing topics, politely redirect to boxing. \
Keep responses concise and helpful. Include emojis occasionally. \
Focus on practical boxing advice.";
const RESPONDER_MAX_TOKENS: u32 = 200;
const RESPONDER_TEMPERATURE: f32 = 0.7;

/// Last pipeline stage. Always produces text.
#[derive(Clone)]
pub struct AiResponder {
    client: Option<Arc<dyn CompletionClient>>,
}

impl AiResponder {
    /// `client` is `None` when no credential is configured.
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    pub async fn respond(&self, message: &str) -> String {
        let Some(client) = &self.client else {
            return NO_CREDENTIAL_REPLY.to_string();
        };

        let request = CompletionRequest {
            messages: vec![
                PromptMessage::system(PERSONA_PROMPT),
                PromptMessage::user(message),
            ],
            max_tokens: RESPONDER_MAX_TOKENS,
            temperature: RESPONDER_TEMPERATURE,
        };

        match client.complete(request).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                tracing::warn!("Completion service returned an empty reply");
                SERVICE_FAILURE_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Completion service call failed");
                SERVICE_FAILURE_REPLY.to_string()
            }
        }
    }
}

impl std::fmt::Debug for AiResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiResponder")
            .field("has_client", &self.client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chatbot::completion::{CompletionError, ScriptedCompletionClient};

    #[tokio::test]
    async fn test_no_client_returns_configure_message() {
        let responder = AiResponder::new(None);
        assert_eq!(responder.respond("How to improve footwork?").await, NO_CREDENTIAL_REPLY);
    }

    #[tokio::test]
    async fn test_reply_passed_through() {
        let client = Arc::new(ScriptedCompletionClient::new(vec![Ok(
            "Stay on the balls of your feet. 🥊".to_string(),
        )]));
        let responder = AiResponder::new(Some(client.clone()));

        assert_eq!(
            responder.respond("footwork tips").await,
            "Stay on the balls of your feet. 🥊"
        );
        let request = &client.requests()[0];
        assert_eq!(request.max_tokens, 200);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.messages[1].content, "footwork tips");
    }

    #[tokio::test]
    async fn test_failures_return_trouble_message() {
        let client = Arc::new(ScriptedCompletionClient::new(vec![
            Err(CompletionError::Timeout),
            Ok(String::new()),
            Err(CompletionError::MalformedResponse("no choices".to_string())),
        ]));
        let responder = AiResponder::new(Some(client));
        for _ in 0..3 {
            assert_eq!(responder.respond("footwork").await, SERVICE_FAILURE_REPLY);
        }
    }
}
