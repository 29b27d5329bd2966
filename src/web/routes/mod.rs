//! Contains all the routes that this application can handle.

mod api;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::AppState;

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health-check", get(health_check))
        .nest("/api", api_routes(app_state))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/waitlist", post(api::join_waitlist))
        .with_state(app_state)
}
