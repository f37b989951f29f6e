//! Rule-based diagram layout, used when the model returns nothing usable.
//!
//! The prompt's distinct key terms (up to six) become the nodes. A prompt
//! that only mentions mind-map keywords is laid out radially around its
//! first term; anything else becomes a top-to-bottom flowchart with arrows
//! between consecutive steps. Output is in the descriptor format consumed by
//! [`crate::whiteboard::importer::import_shapes`].

use std::f64::consts::PI;

use serde_json::{json, Value};
use uuid::Uuid;

const STOP_WORDS: &[&str] = &[
    "flow", "diagram", "flowchart", "with", "and", "the", "that", "this", "from", "into",
    "create", "make", "show",
];
const FLOW_KEYWORDS: &[&str] = &["flow", "diagram", "flowchart", "process", "sequence"];
const MIND_MAP_KEYWORDS: &[&str] = &["mind", "map", "concept", "idea", "brainstorm"];
const GENERIC_STEPS: &[&str] = &["Start", "Input", "Process", "Decision", "Output", "End"];
const STEP_COLORS: &[&str] = &[
    "light-blue", "light-green", "yellow", "orange", "light-violet", "light-red", "blue",
    "green", "violet",
];
const MAX_NODES: usize = 6;

const CENTER_X: f64 = 400.0;
const FLOW_TOP: f64 = 150.0;
const FLOW_GAP: f64 = 100.0;
const MAP_CENTER: (f64, f64) = (400.0, 350.0);
const MAP_RADIUS: f64 = 250.0;
const MAP_NODE: (f64, f64) = (200.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Flowchart,
    MindMap,
}

impl DiagramKind {
    /// Flowchart unless the words carry mind-map keywords and no flow keywords.
    pub fn detect(words: &[String]) -> Self {
        let mentions = |set: &[&str]| words.iter().any(|w| set.contains(&w.as_str()));
        if !mentions(FLOW_KEYWORDS) && mentions(MIND_MAP_KEYWORDS) {
            DiagramKind::MindMap
        } else {
            DiagramKind::Flowchart
        }
    }
}

pub fn rule_based_diagram(prompt: &str) -> Vec<Value> {
    let words: Vec<String> = prompt
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    let mut terms = key_terms(&words);
    if terms.len() < 2 {
        terms = GENERIC_STEPS.iter().map(|s| s.to_string()).collect();
    }

    let mut shapes = vec![title_shape(prompt.trim())];
    match DiagramKind::detect(&words) {
        DiagramKind::Flowchart => flowchart(&terms, &mut shapes),
        DiagramKind::MindMap => mind_map(&terms, &mut shapes),
    }
    shapes
}

/// Distinct words longer than three characters, in order of first use.
fn key_terms(words: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in words {
        if terms.len() == MAX_NODES {
            break;
        }
        if word.chars().count() > 3 && !STOP_WORDS.contains(&word.as_str()) && !terms.contains(word)
        {
            terms.push(word.clone());
        }
    }
    terms
}

struct Step {
    geo: &'static str,
    text: String,
    color: &'static str,
}

fn flow_step(i: usize, last: usize, term: &str) -> Step {
    let (geo, text, color) = if i == 0 {
        ("oval", "Start: Initialize variables".to_string(), "green")
    } else if i == last {
        ("oval", "End: Display result".to_string(), "light-red")
    } else if i == 3 || term.contains('?') || term.to_lowercase().contains("decision") {
        ("diamond", format!("Decision: Is {term} valid?"), "yellow")
    } else if i == 1 {
        ("rectangle", format!("Input: Get {term} from user"), "light-blue")
    } else if i == 2 {
        ("rectangle", format!("Process: Calculate {term}"), "blue")
    } else {
        (
            "rectangle",
            format!("Process: Apply {term} operation"),
            STEP_COLORS[i % STEP_COLORS.len()],
        )
    };
    Step { geo, text, color }
}

/// Width grows with text length, height with line count, both capped.
fn node_size(text: &str) -> (f64, f64) {
    let chars = text.chars().count() as f64;
    let lines = text.lines().count().max(1) as f64;
    (
        (120.0 + chars * 5.0).clamp(180.0, 400.0),
        (50.0 + lines * 20.0).clamp(100.0, 200.0),
    )
}

fn flowchart(terms: &[String], shapes: &mut Vec<Value>) {
    let last = terms.len() - 1;
    let mut y = FLOW_TOP;
    let mut previous: Option<(String, &'static str)> = None;

    for (i, term) in terms.iter().enumerate() {
        let step = flow_step(i, last, term);
        let (mut w, mut h) = node_size(&step.text);
        if step.geo == "diamond" {
            w = w.max(180.0);
            h = h.max(120.0);
        }

        let id = short_id("node");
        shapes.push(geo_shape(
            &id,
            step.geo,
            (CENTER_X, y),
            (w, h),
            &step.text,
            step.color,
            format!("a{}", i + 1),
        ));

        if let Some((previous_id, previous_geo)) = previous.take() {
            // Diamonds are entered and left through their points.
            let from = if previous_geo == "diamond" { (0.5, 0.75) } else { (0.5, 1.0) };
            let to = if step.geo == "diamond" { (0.5, 0.25) } else { (0.5, 0.0) };
            shapes.push(arrow_shape(
                (&previous_id, from),
                (&id, to),
                (CENTER_X, y - FLOW_GAP / 2.0),
                format!("az{i}"),
            ));
        }

        previous = Some((id, step.geo));
        y += h + FLOW_GAP;
    }
}

fn mind_map(terms: &[String], shapes: &mut Vec<Value>) {
    let Some((center, spokes)) = terms.split_first() else {
        return;
    };
    let (cx, cy) = MAP_CENTER;
    let (w, h) = MAP_NODE;

    let hub_id = short_id("mind");
    shapes.push(geo_shape(
        &hub_id,
        "oval",
        (cx - w / 2.0, cy - h / 2.0),
        (w, h),
        &capitalize(center),
        "light-blue",
        "a1".to_string(),
    ));

    let angle_step = 2.0 * PI / terms.len() as f64;
    for (k, term) in spokes.iter().enumerate() {
        let i = k + 1;
        let angle = i as f64 * angle_step;
        let x = cx + MAP_RADIUS * angle.cos() - w / 2.0;
        let y = cy + MAP_RADIUS * angle.sin() - h / 2.0;

        let id = short_id("mind");
        shapes.push(geo_shape(
            &id,
            "rectangle",
            (x, y),
            (w, h),
            &capitalize(term),
            "light-blue",
            format!("a{}", i + 1),
        ));
        shapes.push(arrow_shape(
            (&hub_id, (0.5, 0.5)),
            (&id, (0.5, 0.5)),
            ((cx + x + w / 2.0) / 2.0, (cy + y + h / 2.0) / 2.0),
            format!("az{i}"),
        ));
    }
}

fn title_shape(prompt: &str) -> Value {
    json!({
        "id": short_id("title"),
        "type": "text",
        "x": CENTER_X,
        "y": 50.0,
        "index": "a0",
        "props": {
            "text": capitalize(prompt),
            "color": "black",
            "size": "l",
            "font": "draw",
            "textAlign": "middle",
            "w": 500.0,
            "autoSize": true
        }
    })
}

fn geo_shape(
    id: &str,
    geo: &str,
    (x, y): (f64, f64),
    (w, h): (f64, f64),
    text: &str,
    color: &str,
    index: String,
) -> Value {
    json!({
        "id": id,
        "type": "geo",
        "x": x,
        "y": y,
        "index": index,
        "props": {
            "geo": geo,
            "w": w,
            "h": h,
            "text": text,
            "color": color,
            "labelColor": "black",
            "size": "m",
            "font": "draw",
            "align": "middle",
            "verticalAlign": "middle",
            "fill": "solid",
            "dash": "draw"
        }
    })
}

fn arrow_shape(
    (from, from_anchor): (&str, (f64, f64)),
    (to, to_anchor): (&str, (f64, f64)),
    (x, y): (f64, f64),
    index: String,
) -> Value {
    let terminal = |shape: &str, (ax, ay): (f64, f64)| {
        json!({
            "type": "binding",
            "boundShapeId": shape,
            "normalizedAnchor": { "x": ax, "y": ay },
            "isExact": false
        })
    };
    json!({
        "id": short_id("arrow"),
        "type": "arrow",
        "x": x,
        "y": y,
        "index": index,
        "props": {
            "color": "black",
            "start": terminal(from, from_anchor),
            "end": terminal(to, to_anchor),
            "arrowheadStart": "none",
            "arrowheadEnd": "arrow"
        }
    })
}

fn short_id(kind: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("shape:{kind}-{}", &hex[..8])
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whiteboard::importer::import_shapes;

    fn of_type<'a>(shapes: &'a [Value], kind: &str) -> Vec<&'a Value> {
        shapes.iter().filter(|s| s["type"] == kind).collect()
    }

    #[test]
    fn test_flowchart_steps_and_connections() {
        let shapes = rule_based_diagram("Design a login flow for users with password reset");

        let nodes = of_type(&shapes, "geo");
        let arrows = of_type(&shapes, "arrow");
        assert_eq!(nodes.len(), 5);
        assert_eq!(arrows.len(), 4);

        assert_eq!(nodes[0]["props"]["geo"], "oval");
        assert_eq!(nodes[0]["props"]["color"], "green");
        assert_eq!(nodes[1]["props"]["text"], "Input: Get login from user");
        assert_eq!(nodes[2]["props"]["text"], "Process: Calculate users");
        assert_eq!(nodes[3]["props"]["geo"], "diamond");
        assert_eq!(nodes[3]["props"]["text"], "Decision: Is password valid?");
        assert_eq!(nodes[4]["props"]["text"], "End: Display result");

        assert_eq!(arrows[0]["props"]["start"]["boundShapeId"], nodes[0]["id"]);
        assert_eq!(arrows[0]["props"]["end"]["boundShapeId"], nodes[1]["id"]);
        assert_eq!(arrows[2]["props"]["end"]["normalizedAnchor"]["y"], 0.25);
        assert_eq!(arrows[3]["props"]["start"]["normalizedAnchor"]["y"], 0.75);
    }

    #[test]
    fn test_flowchart_nodes_do_not_overlap() {
        let shapes = rule_based_diagram("checkout process for online orders and refunds");
        let nodes = of_type(&shapes, "geo");
        for pair in nodes.windows(2) {
            let bottom = pair[0]["y"].as_f64().unwrap() + pair[0]["props"]["h"].as_f64().unwrap();
            assert!(pair[1]["y"].as_f64().unwrap() > bottom);
        }
    }

    #[test]
    fn test_mind_map_radiates_from_first_term() {
        let shapes = rule_based_diagram("brainstorm ideas about rust ownership");
        let nodes = of_type(&shapes, "geo");
        let arrows = of_type(&shapes, "arrow");

        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0]["props"]["text"], "Brainstorm");
        assert_eq!(nodes[0]["props"]["geo"], "oval");
        assert_eq!((nodes[0]["x"].as_f64(), nodes[0]["y"].as_f64()), (Some(300.0), Some(300.0)));
        assert_eq!(arrows.len(), 4);
        assert!(arrows
            .iter()
            .all(|a| a["props"]["start"]["boundShapeId"] == nodes[0]["id"]));
    }

    #[test]
    fn test_vague_prompt_uses_generic_steps() {
        let shapes = rule_based_diagram("ER");
        let nodes = of_type(&shapes, "geo");
        assert_eq!(nodes.len(), GENERIC_STEPS.len());
        assert_eq!(nodes[3]["props"]["text"], "Decision: Is Decision valid?");
        assert_eq!(shapes[0]["props"]["text"], "Er");
    }

    #[test]
    fn test_layout_imports_cleanly() {
        let shapes = rule_based_diagram("Design a login flow for users with password reset");
        let result = import_shapes(&shapes);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.shapes.len(), shapes.len());
        assert_eq!(result.bindings.len(), 8);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("SHOW me a MAP"), "Show me a map");
        assert_eq!(capitalize(""), "");
    }
}
