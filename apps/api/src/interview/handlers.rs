//! Axum route handlers for the Interview API. Every route requires a bearer token.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::interview::models::{CreateInterviewRequest, Interview};
use crate::state::AppState;

/// POST /api/v1/interview/createinterview
pub async fn handle_create_interview(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<Interview>), AppError> {
    let interview = request.validate()?.into_interview(&user.user_id, Utc::now());
    let interview = state.interviews.insert(&interview).await?;

    info!("Created interview {} for user {}", interview.id, user.user_id);
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/v1/interview/getinterviews
///
/// Only the caller's own interviews.
pub async fn handle_get_interviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Interview>>, AppError> {
    let interviews = state.interviews.list_for_user(&user.user_id).await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interview/getinterview/:id
///
/// Any authenticated caller can read any interview by id: unlike the list
/// route there is no ownership filter here.
pub async fn handle_get_interview(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Interview>, AppError> {
    state
        .interviews
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
}
