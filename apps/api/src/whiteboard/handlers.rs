//! Axum route handler for the Whiteboard import API.

use axum::Json;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::whiteboard::importer::{import_shapes, ImportResult};

/// POST /api/v1/whiteboard/import
///
/// Body: a JSON array of shape descriptors.
pub async fn handle_import(
    AppJson(body): AppJson<Value>,
) -> Result<Json<ImportResult>, AppError> {
    let descriptors = body.as_array().ok_or_else(|| {
        AppError::Validation("Received data is not an array of shapes".to_string())
    })?;

    let result = import_shapes(descriptors);
    info!(
        "Imported {} shapes, {} bindings ({} skipped)",
        result.shapes.len(),
        result.bindings.len(),
        result.skipped
    );
    Ok(Json(result))
}
