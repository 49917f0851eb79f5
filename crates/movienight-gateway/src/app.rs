use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use movienight_scheduler::Scheduler;
use movienight_store::SuggestionStore;

use crate::http;

/// Shared state for the operator HTTP surface.
pub struct AppState {
    pub store: Arc<SuggestionStore>,
    pub scheduler: Arc<Scheduler>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(http::health::health_handler))
        .route("/status", get(http::health::status_handler))
        .route("/trigger-poll", get(http::control::trigger_poll_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
