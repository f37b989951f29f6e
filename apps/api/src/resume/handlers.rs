//! Axum route handler for resume evaluation.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::resume::evaluator::evaluate_resume;
use crate::resume::models::ResumeEvaluation;
use crate::resume::upload::{extract_text, ResumeFormat};
use crate::state::AppState;

/// POST /api/v1/resume/evaluate
///
/// Multipart form: `file` (required, .pdf/.txt/.md) and `role` (optional).
pub async fn handle_evaluate_resume(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ResumeEvaluation>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut role: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                upload = Some((file_name, bytes.to_vec()));
            }
            "role" => {
                let text = field.text().await?;
                let text = text.trim();
                if !text.is_empty() {
                    role = Some(text.to_string());
                }
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let (file_name, bytes) = upload
        .ok_or_else(|| AppError::Validation("a 'file' field is required".to_string()))?;
    let format = ResumeFormat::from_filename(&file_name)?;
    let text = extract_text(bytes, format).await?;
    let role = role.unwrap_or_else(|| state.resume_role.to_string());

    debug!("User {} uploaded '{file_name}' for review", user.user_id);
    let evaluation = evaluate_resume(state.completion.as_ref(), &text, &role).await;
    Ok(Json(evaluation))
}
