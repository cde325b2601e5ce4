use crate::dashboard::render_dashboard;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::Html};

/// Server-rendered dashboard; the embedded script keeps it fresh.
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let summary = state
        .account
        .position_summary()
        .await
        .map_err(AppError::UpstreamPage)?;

    Ok(Html(render_dashboard(&summary, state.account_index)))
}
