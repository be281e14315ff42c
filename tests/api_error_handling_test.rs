use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bookshelf::api;
use bookshelf::db;
use bookshelf::infrastructure::AppState;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db, 100)
}

// The API router is mounted under /api by the server
fn app(state: AppState) -> Router {
    Router::new().nest("/api", api::api_router_with_state(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn total_books(app: &Router) -> u64 {
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/books"))
        .await
        .unwrap();
    body_json(response).await["pagination"]["totalBooks"]
        .as_u64()
        .unwrap()
}

#[tokio::test]
async fn test_create_book_missing_title() {
    let app = app(setup_test_state().await);

    let req = json_request(
        "POST",
        "/api/books",
        json!({ "author": "Frank Herbert" }).to_string(),
    );
    let response = app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Title is required"));
    assert_eq!(total_books(&app).await, 0);
}

#[tokio::test]
async fn test_create_book_blank_author() {
    let app = app(setup_test_state().await);

    let req = json_request(
        "POST",
        "/api/books",
        json!({ "title": "Dune", "author": "   " }).to_string(),
    );
    let response = app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Author is required"));
    assert_eq!(total_books(&app).await, 0);
}

#[tokio::test]
async fn test_create_book_invalid_reading_status() {
    let app = app(setup_test_state().await);

    let req = json_request(
        "POST",
        "/api/books",
        json!({ "title": "Dune", "author": "Frank Herbert", "readingStatus": "abandoned" })
            .to_string(),
    );
    let response = app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("`abandoned` is not a valid reading status")
    );
    assert_eq!(total_books(&app).await, 0);
}

#[tokio::test]
async fn test_create_book_non_numeric_year() {
    let app = app(setup_test_state().await);

    let req = json_request(
        "POST",
        "/api/books",
        json!({ "title": "Dune", "author": "Frank Herbert", "publishedYear": "sixties" })
            .to_string(),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("publishedYear must be a whole number")
    );
}

#[tokio::test]
async fn test_create_book_malformed_json() {
    let app = app(setup_test_state().await);

    let req = json_request("POST", "/api/books", "{\"title\": ".to_string());
    let response = app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(total_books(&app).await, 0);
}

#[tokio::test]
async fn test_get_book_not_found() {
    let app = app(setup_test_state().await);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/books/no-such-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Book not found" }));

    // A well-formed UUID that was never issued behaves the same
    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/books/00000000-0000-4000-8000-000000000000",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_book_not_found() {
    let app = app(setup_test_state().await);

    let req = json_request(
        "PUT",
        "/api/books/no-such-id",
        json!({ "title": "Dune", "author": "Frank Herbert" }).to_string(),
    );
    let response = app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Book not found" }));
    assert_eq!(total_books(&app).await, 0);
}

#[tokio::test]
async fn test_update_book_invalid_payload_keeps_original() {
    let app = app(setup_test_state().await);

    let req = json_request(
        "POST",
        "/api/books",
        json!({ "title": "Dune", "author": "Frank Herbert" }).to_string(),
    );
    let created = body_json(app.clone().oneshot(req).await.unwrap()).await;
    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());

    let req = json_request("PUT", &uri, json!({ "title": "", "author": "" }).to_string());
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_delete_book_twice() {
    let app = app(setup_test_state().await);

    let req = json_request(
        "POST",
        "/api/books",
        json!({ "title": "Dune", "author": "Frank Herbert" }).to_string(),
    );
    let created = body_json(app.clone().oneshot(req).await.unwrap()).await;
    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Book not found" }));
}
