use crate::error::AppError;
use crate::models::LlpTotalResponse;
use crate::state::AppState;
use axum::{Json, extract::State};

pub async fn get_llp_total(
    State(state): State<AppState>,
) -> Result<Json<LlpTotalResponse>, AppError> {
    let summary = state
        .account
        .position_summary()
        .await
        .map_err(AppError::Upstream)?;

    Ok(Json(LlpTotalResponse::new(summary, state.account_index)))
}
