// crates/insight/src/client.rs
//! Generative language API client

use crate::error::{InsightError, InsightResult};
use crate::prompt::{api_error_message, extract_text, parse_insight, request_body};
use async_trait::async_trait;
use auralis_config::InsightConfig;
use auralis_core::AiInsight;
use reqwest::Client as ReqwestClient;
use std::time::Duration;

/// Produces a synopsis for a book
#[async_trait]
pub trait InsightService: Send + Sync {
    async fn generate(&self, title: &str, author: &str) -> InsightResult<AiInsight>;
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, without the `/models/...` suffix
    pub endpoint: String,
    pub model: String,
    /// Resolved credential, `None` when not configured
    pub api_key: Option<String>,
    /// Environment variable the credential is read from, for messages
    pub api_key_env: String,
    pub language: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Builds a client configuration from the `[insight]` section
    pub fn from_section(section: &InsightConfig) -> Self {
        Self {
            endpoint: section.endpoint.trim_end_matches('/').to_string(),
            model: section.model.clone(),
            api_key: section.resolve_api_key(),
            api_key_env: section.api_key_env.clone(),
            language: section.language.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let section = InsightConfig::default();
        Self {
            endpoint: section.endpoint,
            model: section.model,
            api_key: None,
            api_key_env: section.api_key_env,
            language: section.language,
            timeout: Duration::from_secs(section.timeout_secs),
            user_agent: format!("Auralis/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl GeminiClient {
    /// Creates a client; a missing credential only fails at request time
    pub fn with_config(config: ClientConfig) -> InsightResult<Self> {
        let inner = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(InsightError::Http)?;

        Ok(Self { inner, config })
    }

    pub fn from_section(section: &InsightConfig) -> InsightResult<Self> {
        Self::with_config(ClientConfig::from_section(section))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

#[async_trait]
impl InsightService for GeminiClient {
    async fn generate(&self, title: &str, author: &str) -> InsightResult<AiInsight> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| InsightError::MissingCredential {
                env_var: self.config.api_key_env.clone(),
            })?;

        log::debug!("Requesting synopsis for '{}' from {}", title, self.config.model);
        let response = self
            .inner
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(title, author, &self.config.language))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            return Err(InsightError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let insight = parse_insight(&extract_text(&body)?)?;
        log::info!(
            "Synopsis for '{}' with {} themes and {} characters",
            title,
            insight.themes.len(),
            insight.characters.len()
        );
        Ok(insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_from_section() {
        let section = InsightConfig {
            endpoint: "http://localhost:9/v1beta/".to_string(),
            api_key: Some("  inline-key ".to_string()),
            api_key_env: "AURALIS_TEST_UNSET_KEY_VAR".to_string(),
            timeout_secs: 5,
            ..InsightConfig::default()
        };

        let config = ClientConfig::from_section(&section);
        assert_eq!(config.endpoint, "http://localhost:9/v1beta");
        assert_eq!(config.api_key.as_deref(), Some("inline-key"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_url() {
        let client = GeminiClient::with_config(ClientConfig::default()).unwrap();
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_request() {
        let config = ClientConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            api_key: None,
            ..ClientConfig::default()
        };
        let client = GeminiClient::with_config(config).unwrap();

        let result = client.generate("Emma", "Jane Austen").await;
        assert!(matches!(
            result,
            Err(InsightError::MissingCredential { ref env_var }) if env_var == "API_KEY"
        ));
    }
}
