//! Axum route handler for the Roadmap API.

use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::roadmap::generator::generate_roadmap;
use crate::roadmap::models::{Roadmap, RoadmapRequest};
use crate::state::AppState;

/// POST /api/v1/roadmap
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<RoadmapRequest>,
) -> Result<Json<Roadmap>, AppError> {
    let topic = request.validate()?;
    tracing::debug!("User {} requested a roadmap for '{topic}'", user.user_id);

    let roadmap = generate_roadmap(state.completion.as_ref(), &topic)
        .await
        .map_err(AppError::generation("roadmap"))?;
    Ok(Json(roadmap))
}
