//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use reqwest::Client;
use serde_json::{json, Value};
use tower::ServiceExt;

use loan_library_server::{
    api::create_router,
    config::{AppConfig, StorageBackend},
    repository::Repository,
    services::Services,
    AppState,
};

const URL_API: &str = "/api/books";
const BASE_URL: &str = "http://localhost:8080/api";

fn app() -> Router {
    let mut config = AppConfig::default();
    config.database.backend = StorageBackend::Memory;
    create_router(AppState::new(config, Services::new(Repository::in_memory())))
}

fn book_payload() -> Value {
    json!({
        "codigo": 1,
        "titulo": "Aprenda programar em uma semana",
        "autor": "Gisiona",
        "isbn": "123456"
    })
}

async fn post_json(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_create_book() {
    let app = app();
    let payload = book_payload();

    let (status, body) = post_json(&app, URL_API, payload.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["codigo"].is_i64());
    assert_eq!(body["titulo"], payload["titulo"]);
    assert_eq!(body["autor"], payload["autor"]);
    assert_eq!(body["isbn"], payload["isbn"]);
    assert!(body["dataCadastro"].is_string());
}

#[tokio::test]
async fn test_create_invalid_book() {
    let app = app();

    let (status, body) = post_json(&app, URL_API, "{}".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_blank_fields_reported_in_order() {
    let app = app();
    let payload = json!({ "titulo": "Dom Casmurro", "autor": " ", "isbn": "" });

    let (status, body) = post_json(&app, URL_API, payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!(["Autor é obrigatório.", "ISBN é obrigatório."])
    );
}

#[tokio::test]
async fn test_duplicate_isbn_rejected() {
    let app = app();
    let payload = book_payload().to_string();

    let (first, _) = post_json(&app, URL_API, payload.clone()).await;
    let (second, body) = post_json(&app, URL_API, payload).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["ISBN já cadastrado."]));
}

#[tokio::test]
async fn test_caller_codigo_ignored() {
    let app = app();

    let (_, first) = post_json(&app, URL_API, book_payload().to_string()).await;
    let second_payload = json!({
        "codigo": 1,
        "titulo": "Vidas Secas",
        "autor": "Graciliano Ramos",
        "isbn": "654321"
    });
    let (status, second) = post_json(&app, URL_API, second_payload.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(first["codigo"], second["codigo"]);
}

#[tokio::test]
async fn test_long_fields_accepted() {
    let app = app();
    let isbn = "9".repeat(40);
    let payload = json!({
        "titulo": "T".repeat(300),
        "autor": "A".repeat(300),
        "isbn": isbn
    });

    let (status, body) = post_json(&app, URL_API, payload.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isbn"], isbn);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = app();

    let (status, body) = post_json(&app, URL_API, "{\"titulo\": ".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_readiness_reports_storage() {
    let app = app();
    let request = Request::builder()
        .uri("/api/ready")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
#[ignore] // Run against a live server with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_live_create_book_twice() {
    let client = Client::new();
    let isbn = format!("live-{}", chrono::Utc::now().timestamp_millis());
    let payload = json!({
        "titulo": "Aprenda programar em uma semana",
        "autor": "Gisiona",
        "isbn": isbn
    });

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0], "ISBN já cadastrado.");
}
