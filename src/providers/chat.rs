//! Chat-completion provider backed by an OpenAI-compatible endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::error::ProviderError;
use super::{ChatModel, Provider};
use crate::message::Message;

/// Fallback text when the endpoint returns no usable completion.
pub const NO_RESPONSE_FALLBACK: &str = "No response generated";

/// Executes a single-turn chat-completion request.
///
/// The query becomes one user-role message; the model name, token budget, and
/// temperature come from the node configuration captured at construction.
pub struct ChatCompletionProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: ChatModel,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionProvider {
    pub fn from_config(client: Client, base_url: &str, model: ChatModel, config: &LlmConfig) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model,
            max_tokens: config.max_tokens(),
            temperature: config.temperature(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for ChatCompletionProvider {
    async fn execute(&self, query: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: self.model.wire_name(),
            messages: vec![Message::user(query)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(
            model = request.model,
            max_tokens = self.max_tokens,
            "sending chat completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat completion request rejected");
            return Err(ProviderError::Status {
                provider: "chat completion",
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response.json().await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string());

        Ok(text)
    }
}
