use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Body of `POST /api/v1/whiteboard/generate-diagram`.
#[derive(Debug, Deserialize)]
pub struct DiagramRequest {
    pub prompt: String,
}

impl DiagramRequest {
    /// The trimmed prompt; blank prompts are rejected.
    pub fn validate(self) -> Result<String, AppError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::Validation("prompt cannot be empty".to_string()));
        }
        Ok(prompt.to_string())
    }
}

/// Tells the caller which socket will carry the diagram.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramTicket {
    pub client_id: String,
    pub socket_path: String,
}
