//! End-to-end tests for the books HTTP surface.
//!
//! Drives the fully assembled router through tower::ServiceExt, so no TCP
//! listener is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use shelf_app::modules;
use shelf_kernel::{settings::Settings, ModuleRegistry};
use shelf_store::{Book, BookStore, JsonFileStore, MemoryStore, SharedStore};

fn app(store: SharedStore) -> Router {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    shelf_http::build_router(&registry, &Settings::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn dune() -> Value {
    json!({ "title": "Dune", "author": "Herbert", "available": true })
}

#[tokio::test]
async fn catalogue_walkthrough() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    let (status, body) = send(&app, "POST", "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "id": 1, "title": "Dune", "author": "Herbert", "available": true })
    );

    let (status, body) = send(&app, "POST", "/books", Some(json!({ "title": "Foo" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));

    let (status, body) = send(
        &app,
        "PUT",
        "/books/1",
        Some(json!({ "available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 1, "title": "Dune", "author": "Herbert", "available": false })
    );

    let (status, body) = send(&app, "GET", "/books/available", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "DELETE", "/books/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Book not found" }));

    let (status, body) = send(&app, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted successfully" }));

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn creates_are_listed_in_order_with_sequential_ids() {
    let app = app(Arc::new(MemoryStore::new()));

    for (i, title) in ["A", "B", "C", "D"].iter().enumerate() {
        let available = i % 2 == 0;
        let (status, body) = send(
            &app,
            "POST",
            "/books",
            Some(json!({ "title": title, "author": "X", "available": available })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], json!(i + 1));
    }

    let (_, all) = send(&app, "GET", "/books", None).await;
    let titles: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "B", "C", "D"]);

    let (_, available) = send(&app, "GET", "/books/available", None).await;
    let titles: Vec<&str> = available
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test]
async fn available_false_is_accepted_on_create() {
    let app = app(Arc::new(MemoryStore::new()));

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "title": "Emma", "author": "Austen", "available": false })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["available"], json!(false));
}

#[tokio::test]
async fn invalid_create_bodies_are_rejected() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    let bodies = [
        json!({ "title": "", "author": "Herbert", "available": true }),
        json!({ "title": "Dune", "author": "", "available": true }),
        json!({ "title": "Dune", "author": "Herbert" }),
        json!({ "title": "Dune", "author": "Herbert", "available": "yes" }),
        json!({}),
        json!(["Dune", "Herbert", true]),
    ];
    for body in bodies {
        let (status, response) = send(&app, "POST", "/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "Invalid input" }));
    }

    let (status, _) = send(&app, "POST", "/books", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_invalid_input() {
    let app = app(Arc::new(MemoryStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/books")
                .header("content-type", "application/json")
                .body(Body::from("{\"title\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn partial_update_keeps_omitted_fields() {
    let store: SharedStore = Arc::new(MemoryStore::with_books(vec![Book {
        id: 4,
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        available: true,
    }]));
    let app = app(store.clone());

    let (status, body) = send(&app, "PUT", "/books/4", Some(json!({ "title": "Dune Messiah" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 4, "title": "Dune Messiah", "author": "Herbert", "available": true })
    );

    let (status, body) = send(&app, "PUT", "/books/4", Some(json!(["Rewritten"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));

    let (status, body) = send(&app, "PUT", "/books/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], json!("Dune Messiah"));
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let app = app(Arc::new(MemoryStore::new()));

    for uri in ["/books/7", "/books/seven"] {
        let (status, body) = send(&app, "PUT", uri, Some(json!({ "available": true }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Book not found" }));
    }
}

#[tokio::test]
async fn unmatched_requests_get_generic_not_found() {
    let app = app(Arc::new(MemoryStore::new()));

    for (method, uri) in [
        ("GET", "/authors"),
        ("PATCH", "/books"),
        ("POST", "/books/1"),
        ("DELETE", "/books/available"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body, json!({ "error": "Not found" }), "{method} {uri}");
    }
}

#[tokio::test]
async fn healthz_answers_ok() {
    let app = app(Arc::new(MemoryStore::new()));

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_lists_book_routes() {
    let app = app(Arc::new(MemoryStore::new()));

    let (status, spec) = send(&app, "GET", "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"].get("/books").is_some());
    assert!(spec["paths"].get("/books/available").is_some());
    assert!(spec["paths"].get("/books/{id}").is_some());
}

#[tokio::test]
async fn file_store_persists_across_router_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");

    let first = app(Arc::new(JsonFileStore::new(&path)));
    let (status, _) = send(&first, "POST", "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);

    let second = app(Arc::new(JsonFileStore::new(&path)));
    let (_, body) = send(&second, "GET", "/books", None).await;
    assert_eq!(
        body,
        json!([{ "id": 1, "title": "Dune", "author": "Herbert", "available": true }])
    );

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, body);
}

#[tokio::test]
async fn failed_delete_does_not_rewrite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    std::fs::write(&path, "[{\"id\":1,\"title\":\"Dune\",\"author\":\"Herbert\",\"available\":true}]")
        .unwrap();

    let app = app(Arc::new(JsonFileStore::new(&path)));
    let (status, _) = send(&app, "DELETE", "/books/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Compact formatting survives because nothing was saved.
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[{\"id\":1,\"title\":\"Dune\",\"author\":\"Herbert\",\"available\":true}]"
    );
}

#[tokio::test]
async fn corrupt_file_reads_as_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    std::fs::write(&path, "not json").unwrap();

    let app = app(Arc::new(JsonFileStore::new(&path)));
    let (status, body) = send(&app, "GET", "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn write_failure_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(JsonFileStore::new(
        dir.path().join("missing-dir").join("books.json"),
    )));

    let (status, body) = send(&app, "POST", "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}
