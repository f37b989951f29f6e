use async_trait::async_trait;
use tracing::info;

use crate::insights::models::GeneratedInsights;
use crate::insights::prompts::build_insights_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

/// Produces a fresh insight payload for an industry.
///
/// Carried in `AppState` as `Arc<dyn InsightGenerator>`.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, industry: &str) -> Result<GeneratedInsights, LlmError>;
}

/// Gemini-backed generator. Output is parsed into the typed schema and
/// validated before it is accepted.
pub struct LlmInsightGenerator {
    llm: LlmClient,
}

impl LlmInsightGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate(&self, industry: &str) -> Result<GeneratedInsights, LlmError> {
        info!("Generating insights for industry '{industry}'");
        let prompt = build_insights_prompt(industry);
        let insights: GeneratedInsights = self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        insights.validate()?;
        Ok(insights)
    }
}
