//! Router-level tests for request handling that resolves before any database
//! round trip: entity resolution, operation gating, payload validation, and
//! body-shape errors. The pool is lazy and never connects.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use inventario_api::{common_routes_with_ready, entity_routes, inventory_model, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .expect("lazy pool");
    let state = AppState {
        pool,
        model: Arc::new(inventory_model().expect("model")),
    };
    axum::Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(entity_routes(state))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn error_code(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let v: Value = serde_json::from_slice(&bytes).expect("json error body");
    v["error"]["code"].as_str().expect("code").to_string()
}

#[tokio::test]
async fn unknown_entity_is_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/sucursales/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(response).await, "not_found");
}

#[tokio::test]
async fn bulk_create_is_gated_per_entity() {
    let response = app()
        .oneshot(post_json("/usuarios/bulk/", r#"[{"nombre":"Ana","email":"ana@x.com"}]"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_code(response).await, "operation_not_allowed");
}

#[tokio::test]
async fn missing_required_field_is_422() {
    let response = app()
        .oneshot(post_json("/usuarios/", r#"{"nombre":"Ana"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(response).await, "validation_error");
}

#[tokio::test]
async fn malformed_email_is_422() {
    let response = app()
        .oneshot(post_json("/usuarios/", r#"{"nombre":"Ana","email":"no-arroba"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn client_supplied_pk_is_422() {
    let response = app()
        .oneshot(post_json(
            "/codigos/",
            r#"{"id_codigo":7,"codigo":"A-1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn array_body_on_create_is_400() {
    let response = app()
        .oneshot(post_json("/usuarios/", r#"[{"nombre":"Ana"}]"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "bad_request");
}

#[tokio::test]
async fn object_body_on_bulk_is_400() {
    let response = app()
        .oneshot(post_json("/codigos/bulk/", r#"{"codigo":"A-1"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_bulk_batch_is_400() {
    let items: Vec<String> = (0..101)
        .map(|i| format!(r#"{{"codigo":"C-{}"}}"#, i))
        .collect();
    let body = format!("[{}]", items.join(","));
    let response = app().oneshot(post_json("/codigos/bulk/", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_item_fails_bulk_before_any_insert() {
    // 2 valid payloads plus one missing its required column: the batch is
    // rejected up front, nothing reaches the store.
    let body = r#"[{"codigo":"A-1"},{"codigo":"A-2"},{"color":"rojo"}]"#;
    let response = app().oneshot(post_json("/codigos/bulk/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn zero_limit_is_422() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/codigos/?limit=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(response).await, "validation_error");
}

#[tokio::test]
async fn health_does_not_touch_the_database() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn routes_accept_both_slash_forms() {
    let with_slash = app()
        .oneshot(post_json("/usuarios/", r#"{"nombre":"Ana"}"#))
        .await
        .unwrap();
    let without_slash = app()
        .oneshot(post_json("/usuarios", r#"{"nombre":"Ana"}"#))
        .await
        .unwrap();
    assert_eq!(with_slash.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(without_slash.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
