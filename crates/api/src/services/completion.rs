//! OpenAI-compatible chat completion client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::services::chatbot::{
    CompletionClient, CompletionError, CompletionRequest, PromptMessage,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ChatbotConfig;

/// Calls `POST {base_url}/chat/completions` with a bearer key.
pub struct OpenAiCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiCompletionClient {
    pub fn new(config: &ChatbotConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
        })
    }

    /// The configured client, or `None` when no credential is set.
    pub fn from_config(
        config: &ChatbotConfig,
    ) -> Result<Option<Arc<dyn CompletionClient>>, CompletionError> {
        if !config.has_credential() {
            return Ok(None);
        }
        let client: Arc<dyn CompletionClient> = Arc::new(Self::new(config)?);
        Ok(Some(client))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pulls `choices[0].message.content` out of a response body.
fn extract_content(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            CompletionError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            endpoint = %self.endpoint,
            max_tokens = request.max_tokens,
            "Calling completion service"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::Transport(e.to_string())
            }
        })?;

        extract_content(&text)
    }
}

impl std::fmt::Debug for OpenAiCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompletionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
