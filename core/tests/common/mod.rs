//! Shared helpers for the core integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use forge_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

pub const BASE_URL: &str = "http://localhost:3000";

struct Expectation {
    method: HttpMethod,
    path: String,
    params: Vec<(String, String)>,
    response: HttpResponse,
}

/// Transport that answers a fixed script of requests in order and asserts
/// each request's method, URL and decoded form body.
#[derive(Default)]
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Expectation>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(
        self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
        response: HttpResponse,
    ) -> Self {
        self.script.borrow_mut().push_back(Expectation {
            method,
            path: format!("{BASE_URL}/{path}"),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            response,
        });
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let expected = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method.as_str(), request.path));
        assert_eq!(request.method, expected.method, "method for {}", request.path);
        assert_eq!(request.path, expected.path);
        assert_eq!(request.form_params(), expected.params, "body for {}", request.path);
        if expected.params.is_empty() {
            assert!(request.body.is_none(), "{} should carry no body", request.path);
        }
        Ok(expected.response)
    }
}

/// Transport that never reaches the server.
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }
}

/// Transport that fails the test if any request is issued.
pub struct ForbiddenTransport;

impl Transport for ForbiddenTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        panic!("no request expected, got {} {}", request.method.as_str(), request.path);
    }
}

pub fn site_json(overrides: serde_json::Value) -> serde_json::Value {
    let mut site = serde_json::json!({
        "id": 1,
        "name": "example.org",
        "directory": "/public",
        "wildcards": false,
        "status": "installing",
        "repository": null,
        "repository_provider": null,
        "repository_branch": null,
        "repository_status": null,
        "quick_deploy": false,
        "project_type": "php",
        "app": null,
        "app_status": null,
        "hipchat_room": null,
        "slack_channel": null,
        "created_at": "2016-12-16 16:38:08"
    });
    if let (Some(site), Some(overrides)) = (site.as_object_mut(), overrides.as_object()) {
        for (key, value) in overrides {
            site.insert(key.clone(), value.clone());
        }
    }
    site
}

pub fn json_response(body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

pub fn empty_response(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: String::new(),
    }
}
