mod common;

use axum::http::StatusCode;
use link_registry::domain::repositories::LinkRepository;
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_redirect_success() {
    let (server, repository) = common::create_test_server();
    common::create_test_link(&repository, "redir1", "https://example.com/target").await;

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");

    let link = repository.find_by_code("redir1").await.unwrap().unwrap();
    assert_eq!(link.clicks, 1);
}

#[tokio::test]
async fn test_redirect_counts_every_visit() {
    let (server, repository) = common::create_test_server();
    common::create_test_link(&repository, "count1", "https://example.com").await;

    for _ in 0..3 {
        assert_eq!(server.get("/count1").await.status_code(), 302);
    }

    let link = repository.find_by_code("count1").await.unwrap().unwrap();
    assert_eq!(link.clicks, 3);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, repository) = common::create_test_server();
    common::create_test_link(&repository, "other1", "https://example.com").await;

    let response = server.get("/nope42").await;

    response.assert_status_not_found();
    assert_eq!(response.text(), "Link not found");

    let untouched = repository.find_by_code("other1").await.unwrap().unwrap();
    assert_eq!(untouched.clicks, 0);
}

#[tokio::test]
async fn test_redirect_store_failure() {
    let repository = Arc::new(common::FailingRepository::default());
    let server = common::create_test_server_with(repository.clone());

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text();
    assert!(body.starts_with("Internal server error (ref: "));
    assert!(!body.contains("connection refused"));
    assert!(repository.calls.load(Ordering::SeqCst) > 0);
}

#[tokio::test]
async fn test_redirect_encodes_unsafe_target() {
    let (server, repository) = common::create_test_server();

    let created = server
        .post("/api/shorten")
        .json(&serde_json::json!({ "url": "https://example.com/a\nb" }))
        .await;
    created.assert_status_ok();
    let code = created.json::<serde_json::Value>()["code"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/a%0Ab");

    let link = repository.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(link.original_url, "https://example.com/a\nb");
    assert_eq!(link.clicks, 1);
}
