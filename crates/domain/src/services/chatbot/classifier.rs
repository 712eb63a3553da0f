//! Decides whether a message is about boxing, fitness or the gym.

use std::sync::Arc;

use shared::text::contains_any;

use super::completion::{CompletionClient, CompletionRequest, PromptMessage};

/// Local vocabulary used when the completion service is unavailable.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "boxing",
    "punch",
    "glove",
    "train",
    "spar",
    "jab",
    "cross",
    "hook",
    "uppercut",
    "heavy bag",
    "speed bag",
    "ring",
    "round",
    "coach",
    "training",
    "technique",
    "footwork",
    "defense",
    "combination",
    "knockout",
    "referee",
    "gym",
    "membership",
    "schedule",
    "class",
];

const CLASSIFIER_INSTRUCTION: &str = "Determine if this question is related to boxing, martial arts, training, fitness, or gym membership. Answer only 'yes' or 'no'.";
const CLASSIFIER_MAX_TOKENS: u32 = 10;

/// In-domain classifier. Never fails: any external problem degrades to the
/// keyword rule.
#[derive(Clone)]
pub struct DomainClassifier {
    client: Option<Arc<dyn CompletionClient>>,
}

impl DomainClassifier {
    /// `client` is `None` when no credential is configured.
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    /// Keyword rule over the lowercased message.
    pub fn keyword_match(message: &str) -> bool {
        contains_any(&message.to_lowercase(), DOMAIN_KEYWORDS)
    }

    pub async fn is_in_domain(&self, message: &str) -> bool {
        let Some(client) = &self.client else {
            return Self::keyword_match(message);
        };

        let request = CompletionRequest {
            messages: vec![
                PromptMessage::system(CLASSIFIER_INSTRUCTION),
                PromptMessage::user(format!("Question: {}", message)),
            ],
            max_tokens: CLASSIFIER_MAX_TOKENS,
            temperature: 0.0,
        };

        match client.complete(request).await {
            Ok(answer) if !answer.trim().is_empty() => {
                let in_domain = answer.to_lowercase().contains("yes");
                tracing::debug!(in_domain, "Classified message with completion service");
                in_domain
            }
            Ok(_) => {
                tracing::warn!("Classifier returned an empty answer, using keyword rule");
                Self::keyword_match(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Classifier call failed, using keyword rule");
                Self::keyword_match(message)
            }
        }
    }
}

impl std::fmt::Debug for DomainClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainClassifier")
            .field("has_client", &self.client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chatbot::completion::{CompletionError, ScriptedCompletionClient};

    #[test]
    fn test_every_keyword_matches_in_any_case() {
        for keyword in DOMAIN_KEYWORDS {
            let message = format!("Tell me about {} please", keyword.to_uppercase());
            assert!(DomainClassifier::keyword_match(&message), "{}", keyword);
        }
    }

    #[test]
    fn test_unrelated_message_misses() {
        assert!(!DomainClassifier::keyword_match("What is the capital of France?"));
    }

    #[tokio::test]
    async fn test_without_client_uses_keywords() {
        let classifier = DomainClassifier::new(None);
        assert!(classifier.is_in_domain("How do I throw a JAB?").await);
        assert!(!classifier.is_in_domain("Best pizza in town?").await);
    }

    #[tokio::test]
    async fn test_client_answer_decides() {
        let client = Arc::new(ScriptedCompletionClient::new(vec![
            Ok("Yes.".to_string()),
            Ok("no".to_string()),
        ]));
        let classifier = DomainClassifier::new(Some(client.clone()));

        assert!(classifier.is_in_domain("Is skipping rope good cardio?").await);
        // The service overrides the keyword rule.
        assert!(!classifier.is_in_domain("boxing day sales").await);

        let requests = client.requests();
        assert_eq!(requests[0].max_tokens, 10);
        assert_eq!(requests[0].temperature, 0.0);
        assert_eq!(requests[0].messages[1].content, "Question: Is skipping rope good cardio?");
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_keywords() {
        let client = Arc::new(ScriptedCompletionClient::new(vec![
            Err(CompletionError::Timeout),
            Ok("   ".to_string()),
            Err(CompletionError::Status(500)),
        ]));
        let classifier = DomainClassifier::new(Some(client));

        assert!(classifier.is_in_domain("Sparring tips?").await);
        assert!(classifier.is_in_domain("Heavy bag routine").await);
        assert!(!classifier.is_in_domain("Stock market outlook").await);
    }
}
