//! Backend connection configuration.
//!
//! Values come from the `[api]` table of `config.toml`; `PASTRY_API_URL` and
//! `PASTRY_API_TOKEN` in the environment (or `.env`) take precedence.

use serde::Deserialize;

/// Environment variable overriding the backend base URL
pub const API_URL_VAR: &str = "PASTRY_API_URL";
/// Environment variable carrying the bearer token
pub const API_TOKEN_VAR: &str = "PASTRY_API_TOKEN";

/// How to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Applies environment overrides on top of the file values.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_URL_VAR).ok(),
            std::env::var(API_TOKEN_VAR).ok(),
        )
    }

    fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let config = ApiConfig::default().with_overrides(
            Some("https://bakery.example/".to_string()),
            Some("secret".to_string()),
        );
        assert_eq!(config.base_url, "https://bakery.example/");
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = ApiConfig::default().with_overrides(Some("  ".to_string()), None);
        assert_eq!(config, ApiConfig::default());
    }
}
