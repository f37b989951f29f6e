use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::errors::AppError;
use crate::llm_client::LlmError;

/// How long a generated insight stays fresh.
pub const INSIGHT_TTL_DAYS: i64 = 7;

pub fn insight_ttl() -> Duration {
    Duration::days(INSIGHT_TTL_DAYS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl DemandLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Medium => "Medium",
            DemandLevel::Low => "Low",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "High" => Some(DemandLevel::High),
            "Medium" => Some(DemandLevel::Medium),
            "Low" => Some(DemandLevel::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

impl MarketOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketOutlook::Positive => "Positive",
            MarketOutlook::Neutral => "Neutral",
            MarketOutlook::Negative => "Negative",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Positive" => Some(MarketOutlook::Positive),
            "Neutral" => Some(MarketOutlook::Neutral),
            "Negative" => Some(MarketOutlook::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

/// The payload the generator is asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedInsights {
    pub salary_ranges: Vec<SalaryRange>,
    /// Percentage.
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

impl GeneratedInsights {
    /// Structural checks serde cannot express.
    pub fn validate(&self) -> Result<(), LlmError> {
        if !self.growth_rate.is_finite() {
            return Err(LlmError::Invalid("growthRate is not a finite number".into()));
        }
        for range in &self.salary_ranges {
            if range.role.trim().is_empty() {
                return Err(LlmError::Invalid("salary range without a role".into()));
            }
            if ![range.min, range.max, range.median].iter().all(|v| v.is_finite()) {
                return Err(LlmError::Invalid(format!(
                    "non-finite salary figure for '{}'",
                    range.role
                )));
            }
            if range.min > range.max {
                return Err(LlmError::Invalid(format!(
                    "salary min exceeds max for '{}'",
                    range.role
                )));
            }
        }
        Ok(())
    }
}

/// A cached insight record. At most one exists per industry key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsight {
    pub industry: String,
    #[serde(flatten)]
    pub insights: GeneratedInsights,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl IndustryInsight {
    /// Stamps a freshly generated payload: valid from `now` for one TTL.
    pub fn stamped(industry: String, insights: GeneratedInsights, now: DateTime<Utc>) -> Self {
        Self {
            industry,
            insights,
            last_updated: now,
            next_update: now + insight_ttl(),
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.next_update
    }
}

/// Normalizes a path segment into the cache key: trimmed, lower-cased.
pub fn industry_key(raw: &str) -> Result<String, AppError> {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }
    Ok(key)
}

#[derive(Debug, FromRow)]
pub struct IndustryInsightRow {
    pub industry: String,
    pub salary_ranges: Json<Vec<SalaryRange>>,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub market_outlook: String,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl TryFrom<IndustryInsightRow> for IndustryInsight {
    type Error = anyhow::Error;

    fn try_from(row: IndustryInsightRow) -> Result<Self, Self::Error> {
        let demand_level = DemandLevel::parse(&row.demand_level)
            .ok_or_else(|| anyhow::anyhow!("unknown demand_level '{}'", row.demand_level))?;
        let market_outlook = MarketOutlook::parse(&row.market_outlook)
            .ok_or_else(|| anyhow::anyhow!("unknown market_outlook '{}'", row.market_outlook))?;
        Ok(IndustryInsight {
            industry: row.industry,
            insights: GeneratedInsights {
                salary_ranges: row.salary_ranges.0,
                growth_rate: row.growth_rate,
                demand_level,
                top_skills: row.top_skills,
                market_outlook,
                key_trends: row.key_trends,
                recommended_skills: row.recommended_skills,
            },
            last_updated: row.last_updated,
            next_update: row.next_update,
        })
    }
}
