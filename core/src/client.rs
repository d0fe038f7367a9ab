//! Stateless request builder and response interpreter for the provisioning API.
//!
//! # Design
//! `ForgeClient` holds only a `base_url` and carries no mutable state between
//! calls. Resource types (`SitesManager`, `Site`) use it to turn a relative
//! API path into an `HttpRequest` and to map an `HttpResponse` status onto
//! `ApiError`. It is cheap to clone, so every entity keeps its own copy.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeClient {
    base_url: String,
}

impl ForgeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the API root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request with no parameters.
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::bare(method, self.url(path))
    }

    /// Request carrying `payload` as a form body.
    pub fn form_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        HttpRequest::form(method, self.url(path), payload)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Check the status, then decode the body as `T`.
pub(crate) fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}
