// Prompt templates for diagram generation.
// The shape schema below is the descriptor format accepted by
// `whiteboard::importer::import_shapes`.

pub const DIAGRAM_SYSTEM: &str = "You are a diagram generation assistant. \
    You MUST respond with a single valid JSON array of shape objects and nothing else. \
    Do NOT use markdown code fences.";

/// Template placeholder: `{prompt}`
pub const DIAGRAM_PROMPT_TEMPLATE: &str = r#"Create a colorful, detailed diagram for: "{prompt}"

Decide whether this is best drawn as a flowchart, a mind map or an org chart.
Include 5-7 shapes with meaningful content, plus a title text shape at the top
(x=400, y=50) holding the request or a close summary of it.

Every node has this structure:
{
  "id": "shape:<unique>",
  "type": "geo",
  "x": number,
  "y": number,
  "props": {
    "geo": "rectangle|oval|diamond|triangle|hexagon|cloud",
    "w": number,
    "h": number,
    "text": "What happens at this step",
    "color": "black|grey|light-violet|violet|blue|light-blue|yellow|orange|green|light-green|light-red|red|white",
    "align": "middle",
    "verticalAlign": "middle",
    "fill": "solid"
  }
}

Shape rules:
- oval for start/end, rectangle for process steps, diamond for decisions,
  cloud for external systems, hexagon for preparation, triangle for warnings.
- Use a different color for each shape: green for start, red for end,
  yellow for decisions. Never make every shape black.
- Size by text length: up to 10 characters w=120 h=60; up to 20 w=180 h=80;
  up to 40 w=240 h=100; longer w=300 h=120. Add 20 to h per extra line.
- Phrase decisions as yes/no questions and describe the concrete operation in
  each process step.
- Leave ample space between shapes.

The title is a text shape:
{ "id": "shape:title", "type": "text", "x": 400, "y": 50,
  "props": { "text": "Title", "size": "l", "textAlign": "middle", "w": 500 } }

Connect sequential steps with arrows in exactly this form:
{
  "id": "shape:arrow-<unique>",
  "type": "arrow",
  "x": 0,
  "y": 0,
  "props": {
    "color": "black",
    "start": { "type": "binding", "boundShapeId": "shape:<source id>",
               "normalizedAnchor": { "x": 0.5, "y": 1.0 }, "isExact": false },
    "end": { "type": "binding", "boundShapeId": "shape:<target id>",
             "normalizedAnchor": { "x": 0.5, "y": 0.0 }, "isExact": false },
    "arrowheadStart": "none",
    "arrowheadEnd": "arrow"
  }
}

Every boundShapeId must be the id of a node in the same array.
Return ONLY the JSON array."#;

pub fn build_diagram_prompt(prompt: &str) -> String {
    DIAGRAM_PROMPT_TEMPLATE.replace("{prompt}", prompt)
}
