//! Provider failure taxonomy and user-facing classification.

use thiserror::Error;

/// Failures raised while routing or executing a provider call.
///
/// Selecting an unimplemented provider is deliberately *not* an error; those
/// routes return a fixed placeholder string instead (degraded success).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The model selector names no known provider route.
    #[error("Invalid model selected")]
    InvalidModel { model: String },

    /// The provider answered with a non-success HTTP status.
    #[error("{provider} request failed with status {status}")]
    Status { provider: &'static str, status: u16 },

    /// The request never completed: connection, TLS, timeout, or a body
    /// that did not decode.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProviderError {
    /// Maps recognized failures onto friendlier messages for the single
    /// user-visible error slot; everything else surfaces its raw Display
    /// form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status: 401, .. } => {
                "Invalid API key. Please check your API key and try again.".to_string()
            }
            Self::Status { status: 429, .. } => {
                "Rate limit exceeded. Please wait a moment and try again.".to_string()
            }
            Self::Status { status: 500, .. } => {
                "API service error. Please try again later.".to_string()
            }
            Self::Transport(err) if err.is_connect() || err.is_timeout() => {
                "No internet connection. Please check your connection and try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_friendly_messages() {
        let cases = [
            (401, "Invalid API key. Please check your API key and try again."),
            (429, "Rate limit exceeded. Please wait a moment and try again."),
            (500, "API service error. Please try again later."),
        ];
        for (status, expected) in cases {
            let err = ProviderError::Status {
                provider: "chat completion",
                status,
            };
            assert_eq!(err.user_message(), expected);
        }
    }

    #[test]
    fn unrecognized_status_surfaces_raw_message() {
        let err = ProviderError::Status {
            provider: "web search",
            status: 403,
        };
        assert_eq!(
            err.user_message(),
            "web search request failed with status 403"
        );
    }

    #[test]
    fn invalid_model_keeps_source_wording() {
        let err = ProviderError::InvalidModel {
            model: "claude".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid model selected");
    }
}
