//! Insight service configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Settings for the generative synopsis service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InsightConfig {
    /// Base URL of the generative language API
    pub endpoint: String,

    /// Model used for synopsis generation
    pub model: String,

    /// Environment variable holding the API credential
    pub api_key_env: String,

    /// Inline credential, used only when the variable is unset
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Language the synopsis is written in
    pub language: String,
}

impl InsightConfig {
    /// Resolves the credential from the environment, then the inline value
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .or_else(|| self.api_key.clone())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "API_KEY".to_string(),
            api_key: None,
            timeout_secs: 30,
            language: "English".to_string(),
        }
    }
}

impl ConfigSection for InsightConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::not_empty(&self.endpoint, "insight.endpoint"),
            Validator::not_empty(&self.model, "insight.model"),
            Validator::not_empty(&self.api_key_env, "insight.api_key_env"),
            Validator::in_range(self.timeout_secs, 1, 300, "insight.timeout_secs"),
            Validator::not_empty(&self.language, "insight.language"),
        ])
    }

    fn merge(&mut self, other: Self) {
        *self = other;
    }

    fn section_name(&self) -> &'static str {
        "insight"
    }
}
