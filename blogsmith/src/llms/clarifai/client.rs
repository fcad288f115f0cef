//! Clarifai HTTP client.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::config::ClarifaiConfig;
use crate::credentials::Credentials;
use crate::error::{LlmError, Result};
use crate::message::ToolCall;
use crate::usage::Usage;

/// Client for Clarifai's OpenAI-compatible inference API.
///
/// Any model hosted on Clarifai is addressed through a single endpoint by
/// its full model path.
#[derive(Debug, Clone)]
pub struct Clarifai {
    pub(crate) config: Arc<ClarifaiConfig>,
    pub(crate) client: reqwest::Client,
}

impl Clarifai {
    /// Creates a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the personal access token is empty or the
    /// HTTP client fails to build.
    pub fn new(config: ClarifaiConfig) -> Result<Self> {
        if config.pat.trim().is_empty() {
            return Err(LlmError::auth("clarifai", "PAT is empty").into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Creates a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when `CLARIFAI_PAT` is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(ClarifaiConfig::from_env()?)
    }

    /// Creates a client from loaded credentials, targeting the given model.
    ///
    /// # Errors
    ///
    /// Returns an error when the credential token is empty.
    pub fn from_credentials(credentials: &Credentials, model: impl Into<String>) -> Result<Self> {
        Self::new(ClarifaiConfig::new(credentials.clarifai_pat()).with_model(model))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClarifaiConfig {
        &self.config
    }

    /// Returns the chat completions endpoint URL.
    pub(crate) fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Builds an authenticated POST request to the given URL.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(&self.config.pat)
            .header("Content-Type", "application/json")
    }

    /// Parse an error response from Clarifai.
    pub(crate) fn parse_error(status: u16, body: &str) -> LlmError {
        if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(body) {
            let error = error_response.error;
            let code = error.code.unwrap_or_else(|| error.error_type.clone());

            return match status {
                401 | 403 => LlmError::auth("clarifai", error.message),
                429 => LlmError::rate_limited("clarifai"),
                400 if error.message.contains("context length")
                    || error.message.contains("context_length") =>
                {
                    LlmError::context_exceeded("clarifai", error.message)
                }
                _ => LlmError::provider_code("clarifai", code, error.message),
            };
        }

        LlmError::http_status(status, body.to_owned())
    }
}

/// OpenAI-compatible error envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: String,
    pub code: Option<String>,
}

/// Chat completion response wire format.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

/// Assistant message within a choice.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::LlmErrorKind;

    #[test]
    fn new_rejects_empty_pat() {
        assert!(Clarifai::new(ClarifaiConfig::new("")).is_err());
    }

    #[test]
    fn new_rejects_whitespace_pat() {
        assert!(Clarifai::new(ClarifaiConfig::new("   ")).is_err());
    }

    #[test]
    fn chat_url_joins_base() {
        let client = Clarifai::new(ClarifaiConfig::new("pat")).unwrap();
        assert_eq!(
            client.chat_url(),
            "https://api.clarifai.com/v2/ext/openai/v1/chat/completions"
        );
    }

    #[test]
    fn chat_url_tolerates_trailing_slash() {
        let client =
            Clarifai::new(ClarifaiConfig::new("pat").with_base_url("http://localhost:8080/v1/"))
                .unwrap();
        assert_eq!(client.chat_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn from_credentials_uses_pat_and_model() {
        let creds = Credentials::new("pat-123", "serper-456");
        let client =
            Clarifai::from_credentials(&creds, "openai/chat-completion/models/gpt-4o").unwrap();
        assert_eq!(client.config().model, "openai/chat-completion/models/gpt-4o");
    }

    mod error_mapping {
        use super::*;

        #[test]
        fn unauthorized_maps_to_auth() {
            let body = r#"{"error": {"message": "Invalid PAT", "type": "authentication_error"}}"#;
            let err = Clarifai::parse_error(401, body);
            assert_eq!(err.kind, LlmErrorKind::Auth);
            assert!(err.message.contains("Invalid PAT"));
        }

        #[test]
        fn forbidden_maps_to_auth() {
            let body = r#"{"error": {"message": "PAT lacks scope", "type": "permission_error"}}"#;
            let err = Clarifai::parse_error(403, body);
            assert_eq!(err.kind, LlmErrorKind::Auth);
        }

        #[test]
        fn too_many_requests_maps_to_rate_limited() {
            let body = r#"{"error": {"message": "slow down", "type": "rate_limit"}}"#;
            let err = Clarifai::parse_error(429, body);
            assert_eq!(err.kind, LlmErrorKind::RateLimited);
            assert!(err.is_retryable());
        }

        #[test]
        fn context_length_maps_to_context_exceeded() {
            let body = r#"{"error": {"message": "This model's maximum context length is 8192 tokens, your request used 9000", "type": "invalid_request_error"}}"#;
            let err = Clarifai::parse_error(400, body);
            assert_eq!(err.kind, LlmErrorKind::ContextExceeded);
        }

        #[test]
        fn other_json_error_maps_to_provider_code() {
            let body = r#"{"error": {"message": "model not found", "type": "invalid_request_error", "code": "model_not_found"}}"#;
            let err = Clarifai::parse_error(404, body);
            assert_eq!(err.kind, LlmErrorKind::Provider);
            assert_eq!(err.code.as_deref(), Some("model_not_found"));
        }

        #[test]
        fn non_json_body_falls_back_to_http_status() {
            let err = Clarifai::parse_error(502, "<html>502</html>");
            assert_eq!(err.kind, LlmErrorKind::HttpStatus);
            assert!(err.message.contains("<html>502</html>"));
        }
    }
}
