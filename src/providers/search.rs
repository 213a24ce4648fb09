//! Web-search providers: the implemented custom-search route and the
//! placeholder routes that have no backend yet.

use reqwest::Client;
use serde::Deserialize;

use super::config::LlmConfig;
use super::error::ProviderError;
use super::Provider;

/// Fallback text when the search endpoint returns an empty item list.
pub const NO_RESULTS_FALLBACK: &str = "No results found";

/// Executes a web search via an HTTP GET against a custom-search endpoint.
///
/// The credential, search-engine identifier, and URL-encoded query travel as
/// query parameters. Result items are flattened into plain text: title,
/// snippet, and link per item, items separated by a blank line.
pub struct WebSearchProvider {
    client: Client,
    base_url: String,
    api_key: String,
    search_engine_id: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

impl WebSearchProvider {
    pub fn from_config(client: Client, base_url: &str, config: &LlmConfig) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: config.api_key.clone(),
            search_engine_id: config.search_engine_id.clone().unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for WebSearchProvider {
    async fn execute(&self, query: &str) -> Result<String, ProviderError> {
        tracing::debug!(engine = %self.search_engine_id, "sending web search request");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.search_engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "web search request rejected");
            return Err(ProviderError::Status {
                provider: "web search",
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        if body.items.is_empty() {
            return Ok(NO_RESULTS_FALLBACK.to_string());
        }

        let text = body
            .items
            .iter()
            .map(|item| format!("{}\n{}\n{}", item.title, item.snippet, item.link))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(text)
    }
}

/// Placeholder route for providers that are selectable but not yet backed by
/// an implementation. Returns a fixed string naming the pending provider and
/// never touches the network: a degraded success rather than an error.
pub struct UnimplementedProvider {
    label: &'static str,
}

impl UnimplementedProvider {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

#[async_trait::async_trait]
impl Provider for UnimplementedProvider {
    async fn execute(&self, _query: &str) -> Result<String, ProviderError> {
        tracing::debug!(provider = self.label, "provider not implemented, returning placeholder");
        Ok(format!("{} implementation pending", self.label))
    }
}
