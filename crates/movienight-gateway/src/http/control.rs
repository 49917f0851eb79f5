use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::app::AppState;

/// GET /trigger-poll — fire the poll now, exactly as the weekly trigger
/// would. Always 200: dispatch failures are logged by the scheduler and
/// leave the store locked, which the response echoes.
pub async fn trigger_poll_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    info!("manual poll trigger via HTTP");
    state.scheduler.trigger_poll().await;
    Json(json!({
        "status": "ok",
        "message": "Poll triggered",
        "locked": state.store.is_locked(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use movienight_scheduler::Scheduler;
    use movienight_store::SuggestionStore;

    fn test_state() -> Arc<AppState> {
        let store = Arc::new(SuggestionStore::in_memory());
        let tz = "Europe/Berlin".parse().unwrap();
        let scheduler = Arc::new(Scheduler::new(Arc::clone(&store), tz, 5, 12).unwrap());
        Arc::new(AppState { store, scheduler })
    }

    #[tokio::test]
    async fn trigger_poll_locks_store_and_echoes_lock_state() {
        let state = test_state();
        state.scheduler.on_poll_time(|| async { Ok(()) });

        let Json(body) = trigger_poll_handler(State(Arc::clone(&state))).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["locked"], true);
        assert!(state.store.is_locked());
    }

    #[tokio::test]
    async fn trigger_poll_without_callback_leaves_store_unlocked() {
        let state = test_state();

        let Json(body) = trigger_poll_handler(State(state)).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["locked"], false);
    }
}
