//! Configuration for the sites client.

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://forge.laravel.com/api/v1";

/// Configuration shared by every request the client builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Versioned API root; request paths are appended to it.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FORGE_API_URL`: API root (default: "https://forge.laravel.com/api/v1")
    pub fn from_env() -> Result<Self, ApiError> {
        match std::env::var("FORGE_API_URL") {
            Ok(value) => Self::new().with_base_url(value),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Set the API root. Must be an absolute http(s) URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        self.base_url = base_url;
        Ok(self)
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ApiError> {
    let url: url::Url = base_url
        .trim()
        .parse()
        .map_err(|e| ApiError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!(
            "base URL must use http or https, got {:?}",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ApiError::Config(format!("base URL {base_url:?} has no host")));
    }
    Ok(())
}
