//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Request bodies are compared as decoded form
//! parameters, so field ordering and percent-encoding details do not matter.

use forge_core::{
    ApiError, Application, ForgeClient, GitApplication, HttpMethod, HttpRequest, HttpResponse,
    Site, SiteAttributes, SitesManager, WordPressApplication,
};

const BASE_URL: &str = "http://localhost:3000";

fn manager() -> SitesManager {
    SitesManager::new(ForgeClient::new(BASE_URL))
}

fn site() -> Site {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let attributes: SiteAttributes =
        serde_json::from_value(vectors["cases"][0]["expected_result"].clone()).unwrap();
    Site::new(ForgeClient::new(BASE_URL), 1, attributes)
}

fn load(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare method, URL and body of `req` with the vector's `expected_request`.
fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let actual: serde_json::Map<String, serde_json::Value> = req
                .form_params()
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            assert_eq!(serde_json::Value::Object(actual), *body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn assert_error(name: &str, err: ApiError, expected: &str) {
    match expected {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound, got {err:?}"),
        "InvalidArgument" => assert!(
            matches!(err, ApiError::InvalidArgument(_)),
            "{name}: expected InvalidArgument, got {err:?}"
        ),
        "HttpError" => assert!(
            matches!(err, ApiError::HttpError { .. }),
            "{name}: expected HttpError, got {err:?}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn application(input: &serde_json::Value) -> Application {
    let str_field = |key: &str| input[key].as_str().map(str::to_string);
    match input["kind"].as_str().unwrap() {
        "git" => {
            let mut app = GitApplication::new();
            if let (Some(provider), Some(repository)) = (str_field("provider"), str_field("repository")) {
                app = app.from_provider(provider.parse().unwrap(), repository);
            }
            app.into()
        }
        "wordpress" => {
            let mut app = WordPressApplication::new();
            if let (Some(database), Some(user)) = (str_field("database"), str_field("user")) {
                app = app.using_database(database, user);
            }
            app.into()
        }
        other => panic!("unknown application kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let m = manager();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let server_id = input["server_id"].as_u64().unwrap();

        let mut builder = m
            .create(input["domain"].as_str().unwrap())
            .with_project_type(input["project_type"].as_str().unwrap());
        if let Some(directory) = input["directory"].as_str() {
            builder = builder.with_directory(directory);
        }
        if let Some(wildcards) = input["wildcards"].as_bool() {
            builder = builder.with_wildcards(wildcards);
        }

        let built = builder.build(server_id);
        if let Some(expected_error) = case["expected_error"].as_str() {
            assert_error(name, built.unwrap_err(), expected_error);
            continue;
        }

        let req = built.unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let site = m.parse_create(server_id, simulated(&case)).unwrap();
        let expected: SiteAttributes = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(site.attributes(), &expected, "{name}: parsed result");
        assert_eq!(site.server_id(), server_id, "{name}: server id");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let m = manager();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let server_id = case["input"]["server_id"].as_u64().unwrap();

        let req = m.build_list(server_id);
        assert_request(name, &req, &case["expected_request"]);

        let sites = m.parse_list(server_id, simulated(&case)).unwrap();
        let expected: Vec<SiteAttributes> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        let actual: Vec<SiteAttributes> = sites.iter().map(|s| s.attributes().clone()).collect();
        assert_eq!(actual, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let m = manager();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let server_id = case["input"]["server_id"].as_u64().unwrap();
        let site_id = case["input"]["site_id"].as_u64().unwrap();

        let req = m.build_get(server_id, site_id);
        assert_request(name, &req, &case["expected_request"]);

        let result = m.parse_get(server_id, simulated(&case));
        if let Some(expected_error) = case["expected_error"].as_str() {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: SiteAttributes = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap().attributes(), &expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let payload: Vec<(String, String)> = case["input"]["payload"]
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
            .collect();

        let mut site = site();
        let built = site.build_update(payload);
        if let Some(expected_error) = case["expected_error"].as_str() {
            assert_error(name, built.unwrap_err(), expected_error);
            continue;
        }

        let req = built.unwrap();
        assert_request(name, &req, &case["expected_request"]);

        assert!(site.apply_update(simulated(&case)).unwrap(), "{name}: result");
        let expected: SiteAttributes = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(site.attributes(), &expected, "{name}: state after update");
    }
}

// ---------------------------------------------------------------------------
// Install / uninstall
// ---------------------------------------------------------------------------

#[test]
fn install_test_vectors() {
    let site = site();
    for case in load(include_str!("../../test-vectors/install.json")) {
        let name = case["name"].as_str().unwrap();
        let app = application(&case["input"]);

        let req = site.build_install(&app).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = forge_core::sites::site::parse_ack(simulated(&case));
        if let Some(expected_error) = case["expected_error"].as_str() {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            assert!(result.unwrap(), "{name}: result");
        }
    }
}

#[test]
fn uninstall_test_vectors() {
    let site = site();
    for case in load(include_str!("../../test-vectors/uninstall.json")) {
        let name = case["name"].as_str().unwrap();
        let app = application(&case["input"]);

        let req = site.build_uninstall(&app);
        assert_request(name, &req, &case["expected_request"]);
        assert!(forge_core::sites::site::parse_ack(simulated(&case)).unwrap(), "{name}: result");
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let site = site();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = site.build_delete();
        assert_request(name, &req, &case["expected_request"]);

        let result = forge_core::sites::site::parse_ack(simulated(&case));
        if let Some(expected_error) = case["expected_error"].as_str() {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            assert!(result.unwrap(), "{name}: result");
        }
    }
}
