use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::insights::models::{IndustryInsight, IndustryInsightRow};

/// Persistence for cached insight records, keyed by normalized industry name.
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// The stored record for `industry`, fresh or not.
    async fn find(&self, industry: &str) -> Result<Option<IndustryInsight>, AppError>;

    /// Inserts or replaces the record for `record.industry`.
    async fn upsert(&self, record: &IndustryInsight) -> Result<IndustryInsight, AppError>;
}

pub struct PgInsightStore {
    pool: PgPool,
}

impl PgInsightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightStore for PgInsightStore {
    async fn find(&self, industry: &str) -> Result<Option<IndustryInsight>, AppError> {
        let row = sqlx::query_as::<_, IndustryInsightRow>(
            "SELECT * FROM industry_insights WHERE industry = $1",
        )
        .bind(industry)
        .fetch_optional(&self.pool)
        .await?;

        row.map(IndustryInsight::try_from)
            .transpose()
            .map_err(AppError::Internal)
    }

    async fn upsert(&self, record: &IndustryInsight) -> Result<IndustryInsight, AppError> {
        let insights = &record.insights;
        let row = sqlx::query_as::<_, IndustryInsightRow>(
            r#"
            INSERT INTO industry_insights
                (industry, salary_ranges, growth_rate, demand_level, top_skills,
                 market_outlook, key_trends, recommended_skills, last_updated, next_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (industry) DO UPDATE SET
                salary_ranges      = EXCLUDED.salary_ranges,
                growth_rate        = EXCLUDED.growth_rate,
                demand_level       = EXCLUDED.demand_level,
                top_skills         = EXCLUDED.top_skills,
                market_outlook     = EXCLUDED.market_outlook,
                key_trends         = EXCLUDED.key_trends,
                recommended_skills = EXCLUDED.recommended_skills,
                last_updated       = EXCLUDED.last_updated,
                next_update        = EXCLUDED.next_update
            RETURNING *
            "#,
        )
        .bind(&record.industry)
        .bind(Json(&insights.salary_ranges))
        .bind(insights.growth_rate)
        .bind(insights.demand_level.as_str())
        .bind(&insights.top_skills)
        .bind(insights.market_outlook.as_str())
        .bind(&insights.key_trends)
        .bind(&insights.recommended_skills)
        .bind(record.last_updated)
        .bind(record.next_update)
        .fetch_one(&self.pool)
        .await?;

        IndustryInsight::try_from(row).map_err(AppError::Internal)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryInsightStore {
        records: Mutex<HashMap<String, IndustryInsight>>,
    }

    impl MemoryInsightStore {
        pub fn len(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl InsightStore for MemoryInsightStore {
        async fn find(&self, industry: &str) -> Result<Option<IndustryInsight>, AppError> {
            Ok(self.records.lock().unwrap().get(industry).cloned())
        }

        async fn upsert(&self, record: &IndustryInsight) -> Result<IndustryInsight, AppError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.industry.clone(), record.clone());
            Ok(record.clone())
        }
    }
}
