//! Axum route handlers for the Industry Insights API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::errors::AppError;
use crate::insights::models::IndustryInsight;
use crate::state::AppState;

/// GET /api/industry/insights/:industry
pub async fn handle_get_insights(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> Result<Json<IndustryInsight>, AppError> {
    let record = state.insights.get_or_generate(&industry, Utc::now()).await?;
    Ok(Json(record))
}

/// POST /api/industry/insights/:industry/refresh
pub async fn handle_refresh_insights(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> Result<Json<IndustryInsight>, AppError> {
    let record = state.insights.refresh(&industry, Utc::now()).await?;
    Ok(Json(record))
}
