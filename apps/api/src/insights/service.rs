use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::insights::generator::InsightGenerator;
use crate::insights::models::{industry_key, IndustryInsight};
use crate::insights::store::InsightStore;

/// Cache-or-generate policy over an `InsightStore` and an `InsightGenerator`.
///
/// `now` is passed in by the caller so the TTL decision is deterministic.
/// Concurrent misses for one key are not coalesced: each generates, and the
/// last upsert wins.
#[derive(Clone)]
pub struct InsightService {
    store: Arc<dyn InsightStore>,
    generator: Arc<dyn InsightGenerator>,
}

impl InsightService {
    pub fn new(store: Arc<dyn InsightStore>, generator: Arc<dyn InsightGenerator>) -> Self {
        Self { store, generator }
    }

    /// Returns the cached record while it is fresh, otherwise regenerates it.
    pub async fn get_or_generate(
        &self,
        industry: &str,
        now: DateTime<Utc>,
    ) -> Result<IndustryInsight, AppError> {
        let key = industry_key(industry)?;

        if let Some(record) = self.store.find(&key).await? {
            if record.is_fresh(now) {
                debug!("Insight cache hit for '{key}'");
                return Ok(record);
            }
            info!("Insight for '{key}' expired at {}", record.next_update);
        } else {
            info!("No insight cached for '{key}'");
        }

        self.regenerate(industry.trim(), key, now).await
    }

    /// Regenerates unconditionally, replacing any stored record.
    pub async fn refresh(
        &self,
        industry: &str,
        now: DateTime<Utc>,
    ) -> Result<IndustryInsight, AppError> {
        let key = industry_key(industry)?;
        info!("Forced refresh of insight for '{key}'");
        self.regenerate(industry.trim(), key, now).await
    }

    async fn regenerate(
        &self,
        industry: &str,
        key: String,
        now: DateTime<Utc>,
    ) -> Result<IndustryInsight, AppError> {
        let insights = self
            .generator
            .generate(industry)
            .await
            .map_err(AppError::generation("industry insights"))?;
        let record = IndustryInsight::stamped(key, insights, now);
        let stored = self.store.upsert(&record).await?;
        info!(
            "Stored insight for '{}' (next update {})",
            stored.industry, stored.next_update
        );
        Ok(stored)
    }
}
