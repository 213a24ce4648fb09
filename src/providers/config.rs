//! Provider configuration carried by the `llm` node.

use serde::{Deserialize, Serialize};

/// Model selector used when the UI has not picked one yet.
pub const DEFAULT_MODEL: &str = "gpt-3.5";
/// Token budget applied when the config leaves it unset.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
/// Sampling temperature applied when the config leaves it unset.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Full configuration of the middle (`llm`) pipeline stage.
///
/// The `model` field selects the provider route (see
/// [`ProviderKind::for_model`](crate::providers::ProviderKind::for_model));
/// the remaining fields are provider-specific parameters, only some of which
/// apply to any given route. A deployed snapshot freezes a copy of this
/// struct, so it is plain cloneable data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider selector: `gpt-3.5`, `gpt-4`, `google`, `bing`, `serp`,
    /// or `duckduckgo`.
    pub model: String,
    /// Credential for the selected provider.
    pub api_key: String,
    /// Completion token budget; defaults to [`DEFAULT_MAX_TOKENS`].
    pub max_tokens: Option<u32>,
    /// Sampling temperature; defaults to [`DEFAULT_TEMPERATURE`].
    pub temperature: Option<f32>,
    /// Search engine identifier, required by the `google` route.
    pub search_engine_id: Option<String>,
    /// Secondary credential reserved for the `serp` route.
    pub serp_api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            max_tokens: None,
            temperature: None,
            search_engine_id: None,
            serp_api_key: None,
        }
    }
}

impl LlmConfig {
    /// Builds a config from environment variables, loading `.env` first if
    /// present.
    ///
    /// Recognized variables: `OPENAI_API_KEY` (credential),
    /// `LOOMBOARD_MODEL` (provider selector), `GOOGLE_SEARCH_ENGINE_ID` and
    /// `SERP_API_KEY` (search routes). Unset variables leave the
    /// corresponding field at its default.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            model: std::env::var("LOOMBOARD_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            max_tokens: None,
            temperature: None,
            search_engine_id: std::env::var("GOOGLE_SEARCH_ENGINE_ID").ok(),
            serp_api_key: std::env::var("SERP_API_KEY").ok(),
        }
    }

    /// Effective token budget.
    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    /// Effective sampling temperature.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Returns `true` if the credential is non-empty after trimming.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Returns `true` if a non-empty search engine identifier is present.
    #[must_use]
    pub fn has_search_engine_id(&self) -> bool {
        self.search_engine_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}
