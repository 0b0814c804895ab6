use axum::Json;
use axum::extract::State;

use sehat_core::models::trend::TrendPoint;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_trends(State(state): State<AppState>) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    let points = state.store.trends().await?;
    Ok(Json(points))
}
