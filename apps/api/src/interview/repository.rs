use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::Interview;

/// Persistence for interview records.
///
/// Carried in `AppState` as `Arc<dyn InterviewRepository>`.
#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Stores the record and returns it as persisted.
    async fn insert(&self, interview: &Interview) -> Result<Interview, AppError>;

    /// All interviews owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Interview>, AppError>;

    /// Lookup by id regardless of owner.
    async fn find(&self, id: Uuid) -> Result<Option<Interview>, AppError>;
}

pub struct PgInterviewRepository {
    pool: PgPool,
}

impl PgInterviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewRepository for PgInterviewRepository {
    async fn insert(&self, interview: &Interview) -> Result<Interview, AppError> {
        Ok(sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews
                (id, title, description, job_role, model, extra_info, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(interview.id)
        .bind(&interview.title)
        .bind(&interview.description)
        .bind(&interview.job_role)
        .bind(&interview.model)
        .bind(&interview.extra_info)
        .bind(&interview.user_id)
        .bind(interview.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Interview>, AppError> {
        Ok(sqlx::query_as::<_, Interview>(
            "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Interview>, AppError> {
        Ok(
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use super::*;

    /// In-process repository for handler tests.
    #[derive(Default)]
    pub struct MemoryInterviewRepository {
        rows: Mutex<Vec<Interview>>,
    }

    #[async_trait]
    impl InterviewRepository for MemoryInterviewRepository {
        async fn insert(&self, interview: &Interview) -> Result<Interview, AppError> {
            self.rows.lock().unwrap().push(interview.clone());
            Ok(interview.clone())
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<Interview>, AppError> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn find(&self, id: Uuid) -> Result<Option<Interview>, AppError> {
            Ok(self.rows.lock().unwrap().iter().find(|i| i.id == id).cloned())
        }
    }
}
