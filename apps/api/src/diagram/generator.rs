use std::collections::HashSet;

use serde_json::Value;
use tracing::{info, warn};

use crate::diagram::fallback::rule_based_diagram;
use crate::diagram::prompts::{build_diagram_prompt, DIAGRAM_SYSTEM};
use crate::llm_client::{parse_json_text, Completion, LlmError};

/// Shape descriptors for `prompt`.
///
/// Never fails: when the model errors or returns nothing usable, the
/// rule-based layout is used instead.
pub async fn generate_diagram(llm: &dyn Completion, prompt: &str) -> Vec<Value> {
    match model_diagram(llm, prompt).await {
        Ok(shapes) => {
            info!("Model produced {} diagram shapes", shapes.len());
            shapes
        }
        Err(e) => {
            warn!(kind = e.kind(), "Diagram generation failed, using rule-based layout: {e}");
            rule_based_diagram(prompt)
        }
    }
}

async fn model_diagram(llm: &dyn Completion, prompt: &str) -> Result<Vec<Value>, LlmError> {
    let text = llm
        .complete(&build_diagram_prompt(prompt), DIAGRAM_SYSTEM)
        .await?;
    let shapes = drop_dangling_arrows(shape_list(parse_json_text(&text)?)?);
    if shapes.is_empty() {
        return Err(LlmError::Invalid("no usable shapes".to_string()));
    }
    Ok(shapes)
}

/// The array itself, or the first array-valued field of a wrapping object.
fn shape_list(value: Value) -> Result<Vec<Value>, LlmError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(fields) => fields
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| LlmError::Invalid("object holds no shape array".to_string())),
        _ => Err(LlmError::Invalid("expected an array of shapes".to_string())),
    }
}

fn is_arrow(shape: &Value) -> bool {
    shape.get("type").and_then(Value::as_str) == Some("arrow")
}

/// Drops arrows whose start or end is not bound to a node in the batch.
fn drop_dangling_arrows(shapes: Vec<Value>) -> Vec<Value> {
    let node_ids: HashSet<String> = shapes
        .iter()
        .filter(|s| !is_arrow(s))
        .filter_map(|s| s.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    shapes
        .into_iter()
        .filter(|shape| {
            if !is_arrow(shape) {
                return true;
            }
            let bound = ["start", "end"].iter().all(|terminal| {
                shape
                    .pointer(&format!("/props/{terminal}/boundShapeId"))
                    .and_then(Value::as_str)
                    .is_some_and(|id| node_ids.contains(id))
            });
            if !bound {
                warn!("Dropping arrow {} with an unbound end", shape["id"]);
            }
            bound
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::scripted::ScriptedCompletion;

    fn reply(value: Value) -> ScriptedCompletion {
        ScriptedCompletion::replying(vec![Ok(value.to_string())])
    }

    #[tokio::test]
    async fn test_model_shapes_are_used_and_dangling_arrows_dropped() {
        let llm = reply(json!([
            { "id": "shape:a", "type": "geo", "props": { "geo": "oval", "text": "Start" } },
            { "id": "shape:b", "type": "geo", "props": { "text": "Work" } },
            { "id": "shape:ab", "type": "arrow",
              "props": { "start": { "type": "binding", "boundShapeId": "shape:a" },
                         "end": { "type": "binding", "boundShapeId": "shape:b" } } },
            { "id": "shape:bx", "type": "arrow",
              "props": { "start": { "type": "binding", "boundShapeId": "shape:b" },
                         "end": { "type": "binding", "boundShapeId": "shape:missing" } } }
        ]));

        let shapes = generate_diagram(&llm, "two step flow").await;

        let ids: Vec<_> = shapes.iter().map(|s| s["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["shape:a", "shape:b", "shape:ab"]);
        assert!(llm.prompts()[0].contains("\"two step flow\""));
    }

    #[tokio::test]
    async fn test_wrapped_array_is_unwrapped() {
        let llm = reply(json!({ "shapes": [ { "id": "shape:t", "type": "text" } ] }));
        let shapes = generate_diagram(&llm, "title only").await;
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0]["id"], "shape:t");
    }

    #[tokio::test]
    async fn test_unusable_reply_falls_back_to_rule_based_layout() {
        for llm in [
            ScriptedCompletion::replying(vec![Ok("I cannot draw that.".to_string())]),
            reply(json!({ "note": "no shapes" })),
            ScriptedCompletion::replying(vec![Err(LlmError::Timeout)]),
        ] {
            let shapes = generate_diagram(&llm, "login flow for users").await;
            assert!(shapes[0]["id"].as_str().unwrap().starts_with("shape:title-"));
            assert!(shapes.iter().any(|s| s["type"] == "arrow"));
        }
    }
}
