use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub job_role: String,
    pub model: String,
    pub extra_info: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/interview/createinterview`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub job_role: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub extra_info: String,
}

impl CreateInterviewRequest {
    /// Trims every field and rejects a blank title or job role.
    pub fn validate(self) -> Result<Self, AppError> {
        let req = CreateInterviewRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            job_role: self.job_role.trim().to_string(),
            model: self.model.trim().to_string(),
            extra_info: self.extra_info.trim().to_string(),
        };
        if req.title.is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if req.job_role.is_empty() {
            return Err(AppError::Validation("jobRole cannot be empty".to_string()));
        }
        Ok(req)
    }

    /// Materializes the record owned by `user_id`. `createdAt` is cut to
    /// microseconds, the resolution of the `TIMESTAMPTZ` column.
    pub fn into_interview(self, user_id: &str, now: DateTime<Utc>) -> Interview {
        Interview {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            job_role: self.job_role,
            model: self.model,
            extra_info: self.extra_info,
            user_id: user_id.to_string(),
            created_at: now.trunc_subsecs(6),
        }
    }
}
