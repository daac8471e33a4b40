use std::time::Duration;

use pretty_assertions::assert_eq;
use rest_store::api::{ApiClient, ApiConfig, ApiError, ApiErrorKind, FormPayload, QueryParams};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_requests_use_base_url_and_merged_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/7"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "Ada"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(
        ApiConfig::new(format!("{}/api/", server.uri())).header("Authorization", "Bearer abc"),
    )
    .unwrap();

    let body = api.get("/users/7", None).await.unwrap();
    assert_eq!(body, json!({"id": 7, "name": "Ada"}));
}

#[tokio::test]
async fn test_reinitialize_replaces_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri()).header("X-First", "1"))
        .unwrap();
    api.get("/ping", None).await.unwrap();

    api.initialize(ApiConfig::new(server.uri()).header("X-Second", "2"))
        .unwrap();
    api.get("/ping", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("x-first").is_some());
    assert!(requests[1].headers.get("x-first").is_none());
    assert_eq!(
        requests[1].headers.get("x-second").unwrap().to_str().unwrap(),
        "2"
    );
}

#[tokio::test]
async fn test_query_params_and_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("page", "2"))
        .and(query_param("done", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"objects": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(body_json(json!({"title": "write tests"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "title": "write tests"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri())).unwrap();

    let mut params = QueryParams::new();
    params.insert("page".into(), json!(2));
    params.insert("done".into(), json!(true));
    api.get("/todos", Some(&params)).await.unwrap();

    let created = api
        .post("/todos", Some(json!({"title": "write tests"})))
        .await
        .unwrap();
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn test_error_status_surfaces_server_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/todos/1"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"title": ["Ensure this field is not blank."]})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri())).unwrap();

    let err = api.put("/todos/1", Some(json!({"title": ""}))).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            status: 422,
            body: json!({"title": ["Ensure this field is not blank."]}),
        }
    );
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_as_text() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/todos/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri())).unwrap();

    let err = api.delete("/todos/1", None).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.payload(), Some(&json!("Bad Gateway")));
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri()).timeout(Duration::from_millis(50)))
        .unwrap();

    let err = api.get("/slow", None).await.unwrap_err();
    assert_eq!(err, ApiError::Network);
    assert_eq!(err.to_string(), "No response from server");
}

#[tokio::test]
async fn test_unencodable_params_are_setup_errors() {
    let server = MockServer::start().await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri())).unwrap();

    let mut params = QueryParams::new();
    params.insert("filter".into(), json!({"nested": {"deep": 1}}));

    let err = api.get("/todos", Some(&params)).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::RequestSetupError);
    assert!(err.to_string().starts_with("Request failed: "));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_post_file_sends_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/uploads"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "up_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri())).unwrap();

    let form = FormPayload::new()
        .text("title", "Quarterly report")
        .file_with_type("document", "report.txt", "text/plain", b"q3 numbers".to_vec());
    let body = api.post_file("/uploads", form).await.unwrap();
    assert_eq!(body, json!({"id": "up_1"}));

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let payload = String::from_utf8_lossy(&requests[0].body);
    assert!(payload.contains("Quarterly report"));
    assert!(payload.contains("filename=\"report.txt\""));
    assert!(payload.contains("q3 numbers"));
}

#[tokio::test]
async fn test_uninitialized_client_sends_nothing() {
    let server = MockServer::start().await;

    let api = ApiClient::new();
    let err = api.get(&format!("{}/todos", server.uri()), None).await.unwrap_err();

    assert_eq!(err, ApiError::NotInitialized);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_configured_content_type_is_sent_with_json_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(header("content-type", "application/vnd.api+json"))
        .and(body_json(json!({"data": {"type": "articles"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(header("content-type", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri()).header("Content-Type", "application/vnd.api+json"))
        .unwrap();

    api.post("/articles", Some(json!({"data": {"type": "articles"}})))
        .await
        .unwrap();
    api.get("/articles", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: Vec<Vec<&str>> = requests
        .iter()
        .map(|r| {
            r.headers
                .get_all("content-type")
                .iter()
                .map(|v| v.to_str().unwrap())
                .collect()
        })
        .collect();
    assert_eq!(
        sent,
        vec![
            vec!["application/vnd.api+json"],
            vec!["application/vnd.api+json"],
        ]
    );
}

#[tokio::test]
async fn test_json_bodies_default_to_application_json() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/todos/3"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "title": "renamed"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new();
    api.initialize(ApiConfig::new(server.uri())).unwrap();

    let body = api
        .put("/todos/3", Some(json!({"title": "renamed"})))
        .await
        .unwrap();
    assert_eq!(body["title"], "renamed");
}
