//! Credential loading for the pipeline's external collaborators.
//!
//! Two secrets are required: the Clarifai personal access token for the LLM
//! endpoint and the Serper key for web search. Both are read once at startup
//! and passed down the call chain as an explicit value object; nothing here
//! writes back into the process environment.

use crate::error::{Error, Result};

/// Environment variable holding the Clarifai personal access token.
pub const CLARIFAI_PAT_VAR: &str = "CLARIFAI_PAT";

/// Environment variable holding the Serper API key.
pub const SERPER_API_KEY_VAR: &str = "SERPER_API_KEY";

/// The two secrets required by the pipeline.
///
/// Process-scoped, loaded once, never persisted.
#[derive(Clone)]
pub struct Credentials {
    clarifai_pat: String,
    serper_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("clarifai_pat", &"***")
            .field("serper_api_key", &"***")
            .finish()
    }
}

impl Credentials {
    /// Build credentials from explicit values.
    #[must_use]
    pub fn new(clarifai_pat: impl Into<String>, serper_api_key: impl Into<String>) -> Self {
        Self {
            clarifai_pat: clarifai_pat.into(),
            serper_api_key: serper_api_key.into(),
        }
    }

    /// Load credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] naming every variable that is
    /// unset or blank. Callers treat this as startup-fatal.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary lookup function.
    ///
    /// Tests use this to avoid mutating the real environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] naming every variable that is
    /// unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();

        let clarifai_pat = match lookup(CLARIFAI_PAT_VAR) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(CLARIFAI_PAT_VAR);
                String::new()
            }
        };

        let serper_api_key = match lookup(SERPER_API_KEY_VAR) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(SERPER_API_KEY_VAR);
                String::new()
            }
        };

        if missing.is_empty() {
            Ok(Self {
                clarifai_pat,
                serper_api_key,
            })
        } else {
            Err(Error::missing_credential(missing))
        }
    }

    /// The Clarifai personal access token.
    #[must_use]
    pub fn clarifai_pat(&self) -> &str {
        &self.clarifai_pat
    }

    /// The Serper API key.
    #[must_use]
    pub fn serper_api_key(&self) -> &str {
        &self.serper_api_key
    }
}
