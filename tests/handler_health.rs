mod common;

use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["store"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_store_down() {
    let server = common::create_server_with_store(Arc::new(common::UnreachableStore));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store"]["status"], "error");
    assert!(json["store"]["message"].is_string());
}
