use crate::state::AppState;
use axum::{Json, extract::State};
use market_data::feed::FeedDebugSnapshot;
use market_data::store::OiSnapshot;

/// Exchange-wide open interest from the in-memory store. Never fails.
pub async fn get_exchange_oi(State(state): State<AppState>) -> Json<OiSnapshot> {
    Json(state.feed.store.snapshot())
}

pub async fn get_ws_debug(State(state): State<AppState>) -> Json<FeedDebugSnapshot> {
    Json(state.feed.debug_snapshot())
}
