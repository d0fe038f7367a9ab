//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values; a `Transport` supplied by the
//! caller performs the actual round-trip. Non-2xx responses are returned by
//! the transport as data so the core owns status interpretation.
//!
//! Bodies are `application/x-www-form-urlencoded`, matching what the
//! provisioning API accepts for every mutating endpoint. Payloads are serde
//! DTOs encoded with `serde_urlencoded`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Ordered form parameters. Order is preserved on the wire.
pub type FormParams = Vec<(String, String)>;

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Request without parameters: no body, no headers.
    pub(crate) fn bare(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Request carrying `payload` as a form-encoded body.
    pub(crate) fn form<T: Serialize + ?Sized>(
        method: HttpMethod,
        path: String,
        payload: &T,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            method,
            path,
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(encode_form(payload)?),
        })
    }

    /// Decode the form body back into ordered pairs. Empty when there is no
    /// body or the body is not valid form data.
    pub fn form_params(&self) -> FormParams {
        self.body
            .as_deref()
            .and_then(|body| decode_form(body).ok())
            .unwrap_or_default()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes an `HttpRequest` and hands back the raw response.
///
/// Implementations must return non-2xx responses as `Ok`; only failures to
/// complete the round-trip map to `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

pub fn encode_form<T: Serialize + ?Sized>(payload: &T) -> Result<String, ApiError> {
    serde_urlencoded::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))
}

pub fn decode_form<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_urlencoded::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
