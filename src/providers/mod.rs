//! Provider dispatch: routing a text query to the configured external
//! backend and normalizing the response to plain text.
//!
//! The dispatch surface is a closed set of provider variants rather than one
//! branching function. [`ProviderKind::for_model`] maps the configuration's
//! model selector onto a variant; each variant owns one [`Provider`]
//! implementation with a single `execute(query) -> text` operation. Adding a
//! provider means adding a variant and an implementation, not editing shared
//! routing code.
//!
//! Dispatch is pure with respect to workflow state: everything a call needs
//! arrives in the query string and the [`LlmConfig`], so the same dispatcher
//! serves live runs and frozen deployed snapshots alike.

mod chat;
mod config;
mod error;
mod search;

pub use chat::{ChatCompletionProvider, NO_RESPONSE_FALLBACK};
pub use config::{LlmConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use error::ProviderError;
pub use search::{UnimplementedProvider, WebSearchProvider, NO_RESULTS_FALLBACK};

use async_trait::async_trait;
use reqwest::Client;

/// Default chat-completion endpoint.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default web-search endpoint.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://customsearch.googleapis.com/customsearch/v1";

/// A single external backend able to answer a text query with text.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Executes the query against this provider and returns plain text.
    async fn execute(&self, query: &str) -> Result<String, ProviderError>;
}

/// Routes a query plus configuration to the matching provider.
///
/// This is the seam the workflow store depends on; tests substitute a mock
/// implementation to observe or suppress network calls.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Resolves the provider route from `config` and executes `query`.
    async fn dispatch(&self, query: &str, config: &LlmConfig) -> Result<String, ProviderError>;
}

/// Wire-level chat model names for the chat-completion family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatModel {
    Gpt35,
    Gpt4,
}

impl ChatModel {
    /// The model name sent on the wire. Everything in the family other than
    /// `gpt-4` maps to `gpt-3.5-turbo`.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Gpt4 => "gpt-4",
            Self::Gpt35 => "gpt-3.5-turbo",
        }
    }
}

/// The closed set of provider routes a configuration can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    /// Chat-completion endpoint (`gpt-3.5`, `gpt-4`).
    ChatCompletion(ChatModel),
    /// Custom web-search endpoint (`google`).
    WebSearch,
    /// Selectable but unimplemented route; carries its display label.
    Unimplemented(&'static str),
}

impl ProviderKind {
    /// Parses the configuration's model selector into a provider route.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidModel`] for selectors outside the
    /// known set.
    pub fn for_model(model: &str) -> Result<Self, ProviderError> {
        match model {
            "gpt-4" => Ok(Self::ChatCompletion(ChatModel::Gpt4)),
            "gpt-3.5" => Ok(Self::ChatCompletion(ChatModel::Gpt35)),
            "google" => Ok(Self::WebSearch),
            "bing" => Ok(Self::Unimplemented("Bing Search API")),
            "serp" => Ok(Self::Unimplemented("SerpAPI")),
            "duckduckgo" => Ok(Self::Unimplemented("DuckDuckGo API")),
            other => Err(ProviderError::InvalidModel {
                model: other.to_string(),
            }),
        }
    }
}

/// Production dispatcher backed by a shared HTTP client.
///
/// Base URLs are overridable so tests can point at a local mock server.
///
/// # Examples
///
/// ```
/// use loomboard::providers::HttpDispatcher;
///
/// let dispatcher = HttpDispatcher::new()
///     .with_chat_base_url("http://localhost:8080/v1");
/// ```
#[derive(Clone, Debug)]
pub struct HttpDispatcher {
    client: Client,
    chat_base_url: String,
    search_base_url: String,
}

impl HttpDispatcher {
    /// Creates a dispatcher pointed at the default public endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            chat_base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
        }
    }

    /// Overrides the chat-completion endpoint.
    #[must_use]
    pub fn with_chat_base_url(mut self, url: impl Into<String>) -> Self {
        self.chat_base_url = url.into();
        self
    }

    /// Overrides the web-search endpoint.
    #[must_use]
    pub fn with_search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }
}

impl Default for HttpDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(&self, query: &str, config: &LlmConfig) -> Result<String, ProviderError> {
        let kind = ProviderKind::for_model(&config.model)?;
        tracing::debug!(model = %config.model, route = ?kind, "dispatching query");

        match kind {
            ProviderKind::ChatCompletion(model) => {
                ChatCompletionProvider::from_config(
                    self.client.clone(),
                    &self.chat_base_url,
                    model,
                    config,
                )
                .execute(query)
                .await
            }
            ProviderKind::WebSearch => {
                WebSearchProvider::from_config(self.client.clone(), &self.search_base_url, config)
                    .execute(query)
                    .await
            }
            ProviderKind::Unimplemented(label) => {
                UnimplementedProvider::new(label).execute(query).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_selectors_route_to_expected_kinds() {
        assert_eq!(
            ProviderKind::for_model("gpt-4").unwrap(),
            ProviderKind::ChatCompletion(ChatModel::Gpt4)
        );
        assert_eq!(
            ProviderKind::for_model("gpt-3.5").unwrap(),
            ProviderKind::ChatCompletion(ChatModel::Gpt35)
        );
        assert_eq!(
            ProviderKind::for_model("google").unwrap(),
            ProviderKind::WebSearch
        );
        assert_eq!(
            ProviderKind::for_model("bing").unwrap(),
            ProviderKind::Unimplemented("Bing Search API")
        );
    }

    #[test]
    fn unknown_selector_is_an_invalid_model() {
        let err = ProviderKind::for_model("palm").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidModel { .. }));
    }

    #[test]
    fn chat_family_maps_wire_names() {
        assert_eq!(ChatModel::Gpt4.wire_name(), "gpt-4");
        assert_eq!(ChatModel::Gpt35.wire_name(), "gpt-3.5-turbo");
    }
}
