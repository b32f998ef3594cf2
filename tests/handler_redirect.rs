mod common;

use axum_test::TestServer;
use common::TEST_HOST;
use serde_json::json;
use shortlink::domain::click_worker::run_click_worker;
use shortlink::domain::repositories::UrlRepository;
use std::time::Duration;

#[tokio::test]
async fn test_redirect_returns_long_url() {
    let (app, repository, _rx) = common::create_test_app();
    common::insert_url(&repository, "abc123", "https://example.com/target").await;

    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/redirect/abc123").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "longUrl": "https://example.com/target" }));
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (app, _repository, mut rx) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/redirect/does-not-exist").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "URL not found");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_queues_click_event() {
    let (app, repository, mut rx) = common::create_test_app();
    common::insert_url(&repository, "abc123", "https://example.com").await;

    let server = TestServer::new(app).unwrap();
    server.get("/api/redirect/abc123").await.assert_status_ok();

    let event = rx.try_recv().expect("click event queued");
    assert_eq!(event.code, "abc123");
}

#[tokio::test]
async fn test_redirect_survives_closed_click_queue() {
    let (app, repository, rx) = common::create_test_app();
    common::insert_url(&repository, "abc123", "https://example.com").await;
    drop(rx);

    let server = TestServer::new(app).unwrap();

    server.get("/api/redirect/abc123").await.assert_status_ok();
}

#[tokio::test]
async fn test_clicks_counted_by_worker() {
    let (app, repository, rx) = common::create_test_app();
    let worker = tokio::spawn(run_click_worker(rx, repository.clone(), 2));

    let server = TestServer::new(app).unwrap();

    let created = server
        .post("/api/shorten")
        .add_header("Host", TEST_HOST)
        .json(&json!({ "longUrl": "https://example.com/counted" }))
        .await
        .json::<serde_json::Value>();
    let code = created["shortCode"].as_str().unwrap().to_string();

    for _ in 0..2 {
        server
            .get(&format!("/api/redirect/{code}"))
            .await
            .assert_json(&json!({ "longUrl": "https://example.com/counted" }));
    }

    let mut clicks = 0;
    for _ in 0..50 {
        clicks = repository.find_by_code(&code).await.unwrap().unwrap().clicks;
        if clicks == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(clicks, 2);

    worker.abort();
}
