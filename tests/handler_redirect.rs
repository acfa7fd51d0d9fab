mod common;

use axum_test::TestServer;
use common::{InMemoryLinkRepository, InMemorySchemaRepository};
use std::sync::Arc;

const ID: &str = "4f1d2c3b4a5e4f60817283940a1b2c3d";

fn server(links: Arc<InMemoryLinkRepository>) -> TestServer {
    let app = common::create_test_app(links, Arc::new(InMemorySchemaRepository::provisioned()));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_same_window() {
    let links = Arc::new(InMemoryLinkRepository::new());
    links.seed(ID, "https://example.com", false);

    let response = server(links).get(&format!("/l/{ID}")).await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("example.com"));
    assert!(page.contains("window.location.replace"));
    assert!(!page.contains("window.open"));
}

#[tokio::test]
async fn test_redirect_new_window() {
    let links = Arc::new(InMemoryLinkRepository::new());
    links.seed(ID, "https://example.com", true);

    let response = server(links).get(&format!("/l/{ID}")).await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("example.com"));
    assert!(page.contains("window.open"));
}

#[tokio::test]
async fn test_redirect_is_public() {
    let links = Arc::new(InMemoryLinkRepository::new());
    links.seed(ID, "https://example.com", false);

    // No Authorization header.
    server(links)
        .get(&format!("/l/{ID}"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_redirect_not_found() {
    let response = server(Arc::new(InMemoryLinkRepository::new()))
        .get("/l/doesnotexist")
        .await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>(),
        serde_json::json!({ "response": "error" })
    );
}

#[tokio::test]
async fn test_redirect_after_delete_not_found() {
    let links = Arc::new(InMemoryLinkRepository::new());
    links.seed(ID, "https://example.com", false);
    let server = server(links.clone());

    server.get(&format!("/l/{ID}")).await.assert_status_ok();

    server
        .post("/config")
        .add_header("Authorization", common::AUTH_TEST)
        .json(&serde_json::json!({ "action": "delete", "id": ID }))
        .await
        .assert_status_ok();

    server
        .get(&format!("/l/{ID}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_escapes_url() {
    let links = Arc::new(InMemoryLinkRepository::new());
    links.seed(ID, "https://example.com/?q=\"><script>alert(1)</script>", false);

    let page = server(links).get(&format!("/l/{ID}")).await.text();

    assert!(page.contains("alert(1)"));
    assert!(!page.contains("<script>alert(1)</script>"));
}

#[tokio::test]
async fn test_redirect_path_with_slashes() {
    let links = Arc::new(InMemoryLinkRepository::new());
    links.seed("team/docs", "https://docs.example.com", false);

    let response = server(links).get("/l/team/docs").await;

    response.assert_status_ok();
    assert!(response.text().contains("docs.example.com"));
}

#[tokio::test]
async fn test_redirect_database_down() {
    let links = Arc::new(InMemoryLinkRepository::new());
    links.set_down(true);

    let response = server(links).get(&format!("/l/{ID}")).await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}
