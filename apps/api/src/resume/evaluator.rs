use tracing::{info, warn};

use crate::llm_client::{parse_json_text, Completion, LlmError};
use crate::resume::models::{AtsEvaluation, NormalEnvelope, NormalEvaluation, ResumeEvaluation};
use crate::resume::prompts::{build_ats_prompt, build_review_prompt, ATS_SYSTEM, REVIEWER_SYSTEM};

/// Runs the ATS review and the role review concurrently.
///
/// Each review falls back to its generic version on its own, so one bad
/// answer never discards the other. This never fails.
pub async fn evaluate_resume(llm: &dyn Completion, resume: &str, role: &str) -> ResumeEvaluation {
    info!("Evaluating a {} character resume for '{role}'", resume.len());
    let ats_prompt = build_ats_prompt(resume);
    let review_prompt = build_review_prompt(role, resume);

    let (ats, review) = tokio::join!(
        ask::<AtsEvaluation>(llm, &ats_prompt, ATS_SYSTEM),
        ask::<NormalEnvelope>(llm, &review_prompt, REVIEWER_SYSTEM),
    );

    let ats_evaluation = ats.unwrap_or_else(|e| {
        warn!(kind = e.kind(), "ATS review unavailable, using fallback: {e}");
        AtsEvaluation::fallback()
    });
    let normal_evaluation = review
        .map(|envelope| envelope.normal_evaluation)
        .unwrap_or_else(|e| {
            warn!(kind = e.kind(), "Role review unavailable, using fallback: {e}");
            NormalEvaluation::fallback()
        });

    ResumeEvaluation {
        ats_evaluation,
        normal_evaluation,
        role: role.to_string(),
    }
}

async fn ask<T: serde::de::DeserializeOwned>(
    llm: &dyn Completion,
    prompt: &str,
    system: &str,
) -> Result<T, LlmError> {
    let text = llm.complete(prompt, system).await?;
    parse_json_text(&text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::scripted::ScriptedCompletion;

    fn ats_reply(score: &str) -> String {
        json!({
            "overall_score": score,
            "sections": { "skills": { "status": "strong", "issues": [], "recommendations": [] } },
            "final_recommendations": ["Lead with impact"]
        })
        .to_string()
    }

    fn review_reply(tone: &str) -> String {
        format!(
            "Here is my review:\n{}",
            json!({ "normal_evaluation": { "overall_feedback": { "tone": tone } } })
        )
    }

    #[tokio::test]
    async fn test_both_reviews_are_parsed() {
        let llm = ScriptedCompletion::replying(vec![Ok(ats_reply("8/10")), Ok(review_reply("Crisp"))]);

        let evaluation = evaluate_resume(&llm, "Jane Doe, Rust engineer", "Backend Engineer").await;

        assert_eq!(evaluation.ats_evaluation.overall_score, "8/10");
        assert_eq!(evaluation.ats_evaluation.sections.skills.status, "strong");
        assert_eq!(evaluation.normal_evaluation.overall_feedback.tone, "Crisp");
        assert_eq!(evaluation.role, "Backend Engineer");

        let prompts = llm.prompts();
        assert!(prompts[0].contains("ATS compliance"));
        assert!(prompts[0].ends_with("Jane Doe, Rust engineer"));
        assert!(prompts[1].contains("for the role of Backend Engineer"));
    }

    #[tokio::test]
    async fn test_each_review_falls_back_on_its_own() {
        let llm = ScriptedCompletion::replying(vec![Err(LlmError::Timeout), Ok(review_reply("Warm"))]);
        let evaluation = evaluate_resume(&llm, "resume", "Web Developer").await;
        assert_eq!(evaluation.ats_evaluation, AtsEvaluation::fallback());
        assert_eq!(evaluation.normal_evaluation.overall_feedback.tone, "Warm");

        let llm = ScriptedCompletion::replying(vec![Ok(ats_reply("9/10")), Ok("no idea".to_string())]);
        let evaluation = evaluate_resume(&llm, "resume", "Web Developer").await;
        assert_eq!(evaluation.ats_evaluation.overall_score, "9/10");
        assert_eq!(evaluation.normal_evaluation, NormalEvaluation::fallback());
    }
}
