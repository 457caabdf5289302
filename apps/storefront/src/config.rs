//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable           | Default                                |
//! |--------------------|----------------------------------------|
//! | `LAREK_API_ORIGIN` | `https://larek-api.nomoreparties.co`   |
//! | `LAREK_API_URL`    | `<origin>/api/weblarek`                |
//! | `LAREK_CDN_URL`    | `<origin>/content/weblarek`            |

use std::env;

use url::Url;

pub const DEFAULT_API_ORIGIN: &str = "https://larek-api.nomoreparties.co";

/// Where the storefront fetches data and images from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Host serving both the API and the content
    pub api_origin: String,

    /// Base URL of the REST API
    pub api_url: String,

    /// Base URL product image paths are appended to
    pub cdn_url: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_origin = lookup("LAREK_API_ORIGIN")
            .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string())
            .trim_end_matches('/')
            .to_string();

        let config = StoreConfig {
            api_url: lookup("LAREK_API_URL")
                .unwrap_or_else(|| format!("{api_origin}/api/weblarek")),
            cdn_url: lookup("LAREK_CDN_URL")
                .unwrap_or_else(|| format!("{api_origin}/content/weblarek")),
            api_origin,
        };

        validate_url("LAREK_API_ORIGIN", &config.api_origin)?;
        validate_url("LAREK_API_URL", &config.api_url)?;
        validate_url("LAREK_CDN_URL", &config.cdn_url)?;

        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            api_origin: DEFAULT_API_ORIGIN.to_string(),
            api_url: format!("{DEFAULT_API_ORIGIN}/api/weblarek"),
            cdn_url: format!("{DEFAULT_API_ORIGIN}/content/weblarek"),
        }
    }
}

fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
