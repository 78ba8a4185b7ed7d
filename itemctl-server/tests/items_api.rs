//! End-to-end checks of the item endpoints against the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use itemctl_server::{build_router, AppState, MemoryItemStore, ServerConfig};

fn app() -> Router {
    let state = AppState::with_store(Arc::new(MemoryItemStore::new()));
    build_router(state, &ServerConfig::default())
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(v) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create(app: &Router, fields: Value) -> Value {
    let (status, body) = call(app, "POST", "/items", Some(fields)).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn widget() -> Value {
    json!({ "name": "widget", "description": "a widget", "quantity": 5 })
}

#[tokio::test]
async fn list_after_one_create_has_one_item() {
    let app = app();
    let created = create(&app, widget()).await;

    let (status, body) = call(&app, "GET", "/items", None).await;
    assert_eq!(status, StatusCode::OK);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0], created);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let app = app();
    let (status, body) = call(
        &app,
        "GET",
        "/items/6f1c2b9e-7d43-4a51-9a0e-2f8f0c1d3b4a",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found!");
}

#[tokio::test]
async fn update_quantity_keeps_other_fields() {
    let app = app();
    let created = create(&app, widget()).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/items/{id}"),
        Some(json!({ "quantity": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["name"], "widget");
    assert_eq!(body["description"], "a widget");
    assert_eq!(body["quantity"].as_f64(), Some(10.0));
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let app = app();
    let (status, body) = call(
        &app,
        "PUT",
        "/items/6f1c2b9e-7d43-4a51-9a0e-2f8f0c1d3b4a",
        Some(json!({ "quantity": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found!");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = app();
    let created = create(&app, widget()).await;
    let uri = format!("/items/{}", created["id"].as_str().unwrap());

    let (status, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item was deleted successfully");

    let (status, _) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_delete_is_404_not_500() {
    let app = app();
    let created = create(&app, widget()).await;
    let uri = format!("/items/{}", created["id"].as_str().unwrap());

    assert_eq!(call(&app, "DELETE", &uri, None).await.0, StatusCode::OK);

    let (status, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found!");
}

#[tokio::test]
async fn get_returns_created_fields() {
    let app = app();
    let field_sets = [
        widget(),
        json!({ "name": "bolt" }),
        json!({ "description": "no name", "quantity": 0.5 }),
        json!({}),
    ];

    for fields in field_sets {
        let created = create(&app, fields.clone()).await;
        let uri = format!("/items/{}", created["id"].as_str().unwrap());
        let (status, fetched) = call(&app, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        for key in ["name", "description"] {
            assert_eq!(fetched.get(key), fields.get(key));
        }
        assert_eq!(
            fetched.get("quantity").and_then(Value::as_f64),
            fields.get("quantity").and_then(Value::as_f64)
        );
    }
}

#[tokio::test]
async fn responses_are_single_encoded_json() {
    let app = app();
    let created = create(&app, widget()).await;
    assert!(created.is_object());
}
