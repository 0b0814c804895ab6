use axum::Json;
use axum::extract::State;

use sehat_core::models::screening::ScreeningRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// Every stored screening, newest first.
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScreeningRecord>>, ApiError> {
    let records = state.store.list_all().await?;
    Ok(Json(records))
}
