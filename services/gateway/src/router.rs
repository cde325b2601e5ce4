use crate::handlers::{account, market, page};
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/llp-total", get(account::get_llp_total))
        .route("/exchange-oi", get(market::get_exchange_oi))
        .route("/ws-debug", get(market::get_ws_debug));

    Router::new()
        .route("/", get(page::get_dashboard))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
