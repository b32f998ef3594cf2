mod common;

use axum_test::TestServer;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (app, _repository, _rx) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let (app, _repository, rx) = common::create_test_app();
    drop(rx);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
}
