use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_text, Completion, LlmError};
use crate::roadmap::models::Roadmap;
use crate::roadmap::prompts::build_roadmap_prompt;

/// Generates a roadmap for `topic`.
///
/// An unusable answer (empty, malformed, or without a `stages` array)
/// yields [`Roadmap::minimal`]. A failed call is returned as an error.
pub async fn generate_roadmap(llm: &dyn Completion, topic: &str) -> Result<Roadmap, LlmError> {
    info!("Generating roadmap for '{topic}'");
    let reply = llm
        .complete(&build_roadmap_prompt(topic), JSON_ONLY_SYSTEM)
        .await
        .and_then(|text| parse_json_text::<Roadmap>(&text));

    match reply {
        Ok(mut roadmap) => {
            if roadmap.title.trim().is_empty() {
                roadmap.title = topic.to_string();
            }
            Ok(roadmap)
        }
        Err(e) if e.is_content_failure() => {
            warn!(kind = e.kind(), "Unusable roadmap for '{topic}', returning minimal: {e}");
            Ok(Roadmap::minimal(topic))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::scripted::ScriptedCompletion;

    #[tokio::test]
    async fn test_reply_is_parsed_and_untitled_roadmap_named_after_topic() {
        let llm = ScriptedCompletion::replying(vec![Ok(json!({
            "stages": [{ "level": "Beginner", "title": "Basics", "timeframe": "2 weeks" }]
        })
        .to_string())]);

        let roadmap = generate_roadmap(&llm, "Go").await.unwrap();

        assert_eq!(roadmap.title, "Go");
        assert_eq!(roadmap.stages[0].timeframe, "2 weeks");
        assert!(llm.prompts()[0].contains("learning roadmap for \"Go\""));
    }

    #[tokio::test]
    async fn test_unusable_reply_yields_minimal_roadmap() {
        for reply in [
            json!({ "title": "Go", "stages": null }).to_string(),
            "```json\n```".to_string(),
            "sorry".to_string(),
        ] {
            let llm = ScriptedCompletion::replying(vec![Ok(reply)]);
            let roadmap = generate_roadmap(&llm, "Go").await.unwrap();
            assert_eq!(roadmap, Roadmap::minimal("Go"));
        }
    }

    #[tokio::test]
    async fn test_failed_call_is_an_error() {
        let llm = ScriptedCompletion::replying(vec![Err(LlmError::Timeout)]);
        let err = generate_roadmap(&llm, "Go").await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }
}
