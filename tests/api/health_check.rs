//! Smoke tests for the service surface outside of /api/waitlist.

use anyhow::Result;
use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_returns_200_without_touching_the_store() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .get(format!("http://{}/health-check", app.addr))
        .send()
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "health-check did not come back healthy: {}",
        res.status()
    );
    // No store mocks are mounted, the route must not need any.
    assert!(app.store_server.received_requests().await.unwrap_or_default().is_empty());

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .get(format!("http://{}/api/queue", app.addr))
        .send()
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::NOT_FOUND,
        "expected an unrouted path to 404, got: {}",
        res.status()
    );

    Ok(())
}
