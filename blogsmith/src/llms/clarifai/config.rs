//! Clarifai client configuration.

use crate::error::{LlmError, Result};

/// Configuration for the Clarifai client.
#[derive(Clone)]
pub struct ClarifaiConfig {
    /// Personal access token for authentication.
    pub pat: String,
    /// Base URL for the OpenAI-compatible API.
    pub base_url: String,
    /// Default model to use.
    ///
    /// Model identifiers are full Clarifai model paths passed verbatim in
    /// the `model` field (e.g., `gcp/generate/models/gemini-2_5-pro`,
    /// `meta/llama-3_1-8b-instruct`). The endpoint is selected by
    /// `base_url`, never by a routing prefix on the model name.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ClarifaiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClarifaiConfig")
            .field("pat", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClarifaiConfig {
    /// Default Clarifai OpenAI-compatible base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.clarifai.com/v2/ext/openai/v1";
    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "gcp/generate/models/gemini-2_5-pro";

    /// Creates a new configuration with the given personal access token.
    #[must_use]
    pub fn new(pat: impl Into<String>) -> Self {
        Self {
            pat: pat.into(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            timeout_secs: Some(120),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `CLARIFAI_PAT` - Required personal access token
    /// - `CLARIFAI_BASE_URL` - Optional base URL
    /// - `CLARIFAI_MODEL` - Optional default model
    ///
    /// # Errors
    ///
    /// Returns an authentication error when `CLARIFAI_PAT` is not set.
    pub fn from_env() -> Result<Self> {
        let pat = std::env::var("CLARIFAI_PAT")
            .map_err(|_| LlmError::auth("clarifai", "CLARIFAI_PAT environment variable not set"))?;

        let base_url = std::env::var("CLARIFAI_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_owned());

        let model =
            std::env::var("CLARIFAI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_owned());

        Ok(Self {
            pat,
            base_url,
            model,
            timeout_secs: Some(120),
        })
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for ClarifaiConfig {
    fn default() -> Self {
        Self {
            pat: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            timeout_secs: Some(120),
        }
    }
}
