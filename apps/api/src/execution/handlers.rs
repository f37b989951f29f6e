//! Axum route handlers for the Execution API.

use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::execution::models::{ExecuteRequest, ExecutionOutcome, Language, LANGUAGES};
use crate::state::AppState;

/// POST /api/v1/execute
///
/// Blocks until the submission reaches a terminal status.
pub async fn handle_execute(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<ExecuteRequest>,
) -> Result<Json<ExecutionOutcome>, AppError> {
    let language = request.validate()?;
    tracing::debug!("User {} running {}", user.user_id, language.name);

    let outcome = state
        .executor
        .run(&request.source_code, language, request.stdin.as_deref())
        .await?;
    Ok(Json(outcome))
}

/// GET /api/v1/execute/languages
pub async fn handle_languages() -> Json<&'static [Language]> {
    Json(LANGUAGES)
}
