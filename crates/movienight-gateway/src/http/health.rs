use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// GET /health — liveness probe with store counters.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "suggestions": state.store.get_suggestion_count(),
        "locked": state.store.is_locked(),
    }))
}

/// GET /status — everything an operator wants at a glance.
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "suggestions": state.store.get_suggestion_count(),
        "locked": state.store.is_locked(),
        "deadline": state.scheduler.deadline_string(),
        "next_deadline": state.scheduler.next_deadline().to_rfc3339(),
        "time_remaining": state.scheduler.time_until_deadline(),
    }))
}
