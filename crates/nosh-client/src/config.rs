//! # Client Configuration
//!
//! Configuration for remote API access.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NOSH_API_URL=https://api.nosh.example/api                          │
//! │     NOSH_API_TOKEN=eyJ...                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/nosh/client.toml (Linux)                                 │
//! │     ~/Library/Application Support/app.nosh.nosh/client.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://api.nosh.example/api"
//! timeout_secs = 30
//!
//! [auth]
//! token = "eyJhbGciOi..."
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where and how to reach the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the API, e.g. `https://api.nosh.example/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Auth Settings
// =============================================================================

/// Bearer-token authentication.
///
/// The token comes from the auth provider's session; for the `menu-push`
/// binary it is supplied via config or `NOSH_API_TOKEN`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Bearer token attached as `Authorization: Bearer <token>`.
    #[serde(default)]
    pub token: Option<String>,
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.api.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "base URL must be http(s), got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NOSH_API_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = url;
        }

        if let Ok(token) = std::env::var("NOSH_API_TOKEN") {
            debug!("Overriding API token from environment");
            self.auth.token = Some(token);
        }

        if let Ok(timeout) = std::env::var("NOSH_API_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.api.timeout_secs = t;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "nosh", "nosh")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.auth.token.is_none());
    }

    #[test]
    fn test_toml_parsing_with_partial_sections() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.nosh.example/api"

            [auth]
            token = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.nosh.example/api");
        assert_eq!(config.api.timeout_secs, 30); // defaulted
        assert_eq!(config.auth.token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_validation_rejects_bad_urls() {
        let mut config = ClientConfig::default();

        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidUrl(_))
        ));

        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[api]"));

        let back: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.api.base_url, config.api.base_url);
    }
}
