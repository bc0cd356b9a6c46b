//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}
