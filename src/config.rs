use std::fmt;

use crate::constants;
use crate::error::{CompletionError, Result};

/// Credentials and endpoint location for a [`CompletionClient`](crate::CompletionClient).
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    /// Forwarded as the `OpenAI-Organization` header, even when empty.
    pub organization: String,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            organization: organization.into(),
            base_url: constants::API_BASE.to_string(),
        }
    }

    /// Reads the API key from `OPENAI_API_KEY` and the organization from
    /// `OPENAI_ORG_ID`. A missing organization is treated as empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(constants::API_KEY_ENV_VAR).map_err(|_| {
            CompletionError::Configuration(format!(
                "{} environment variable not set",
                constants::API_KEY_ENV_VAR
            ))
        })?;
        let organization = std::env::var(constants::ORGANIZATION_ENV_VAR).unwrap_or_default();

        Ok(Self::new(api_key, organization))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn completions_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            constants::COMPLETIONS_ENDPOINT
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_endpoint() {
        let config = ClientConfig::new("sk-test", "org-test");
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/completions"
        );
    }

    #[test]
    fn base_url_override_tolerates_trailing_slash() {
        let config = ClientConfig::new("sk-test", "").with_base_url("http://127.0.0.1:8080/v1/");
        assert_eq!(config.completions_url(), "http://127.0.0.1:8080/v1/completions");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ClientConfig::new("sk-very-secret", "org-test");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("org-test"));
    }
}
