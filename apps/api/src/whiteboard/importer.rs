//! Two-pass shape import.
//!
//! Pass 1 assigns a canvas id to every descriptor that has both `id` and
//! `type`; the first descriptor carrying a source id owns it and later
//! duplicates are skipped. Pass 2 materializes geo, arrow and text records, resolving arrow
//! bindings through the id map from pass 1. Missing fields take defaults;
//! style keywords are clamped by [`crate::whiteboard::styles`].

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::whiteboard::styles::{map_align, map_color, map_text_align, map_vertical_align};

const PAGE_ID: &str = "page:page";

static NULL: Value = Value::Null;

/// Legacy type names that are imported as `geo` shapes of that kind.
const LEGACY_GEO_TYPES: &[&str] = &["rectangle", "oval", "diamond", "triangle", "hexagon", "cloud"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    pub id: String,
    pub type_name: &'static str,
    #[serde(rename = "type")]
    pub shape_type: &'static str,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub is_locked: bool,
    pub opacity: f64,
    pub index: String,
    pub parent_id: &'static str,
    pub meta: Map<String, Value>,
    pub props: ShapeProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapeProps {
    Geo(GeoProps),
    Arrow(ArrowProps),
    Text(TextProps),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoProps {
    pub geo: String,
    pub w: f64,
    pub h: f64,
    pub color: &'static str,
    pub label_color: &'static str,
    pub fill: String,
    pub dash: String,
    pub size: String,
    pub font: String,
    pub align: &'static str,
    pub vertical_align: &'static str,
    pub url: String,
    pub grow_y: f64,
    pub scale: f64,
    pub rich_text: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowProps {
    pub dash: String,
    pub size: String,
    pub fill: String,
    pub color: &'static str,
    pub label_color: &'static str,
    pub bend: f64,
    pub start: Point,
    pub end: Point,
    pub label_position: f64,
    pub scale: f64,
    pub arrowhead_start: String,
    pub arrowhead_end: String,
    pub text: String,
    pub font: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub color: &'static str,
    pub size: String,
    pub font: String,
    pub text_align: &'static str,
    pub w: f64,
    pub auto_size: bool,
    pub scale: f64,
    pub rich_text: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingRecord {
    pub id: String,
    pub type_name: &'static str,
    #[serde(rename = "type")]
    pub binding_type: &'static str,
    pub from_id: String,
    pub to_id: String,
    pub meta: Map<String, Value>,
    pub props: BindingProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingProps {
    pub terminal: &'static str,
    pub normalized_anchor: Point,
    pub is_exact: bool,
    pub is_precise: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportResult {
    pub shapes: Vec<ShapeRecord>,
    pub bindings: Vec<BindingRecord>,
    /// Descriptors dropped for a missing id/type, a duplicate id or an
    /// unknown type.
    pub skipped: usize,
}

/// Imports a batch of shape descriptors.
pub fn import_shapes(descriptors: &[Value]) -> ImportResult {
    let mut id_map: HashMap<String, String> = HashMap::new();
    for shape in descriptors {
        if let (Some(source_id), Some(_)) = (source_id(shape), shape_type(shape)) {
            id_map.entry(source_id).or_insert_with(|| new_id("shape"));
        }
    }

    let mut claimed: HashSet<String> = HashSet::new();
    let mut result = ImportResult::default();
    for shape in descriptors {
        let (Some(source), Some(kind)) = (source_id(shape), shape_type(shape)) else {
            warn!("Skipping shape without id or type: {shape}");
            result.skipped += 1;
            continue;
        };
        if !claimed.insert(source.clone()) {
            warn!("Skipping shape with duplicate id '{source}'");
            result.skipped += 1;
            continue;
        }
        let Some(canvas_id) = id_map.get(&source).cloned() else {
            result.skipped += 1;
            continue;
        };
        let props = shape.get("props").unwrap_or(&NULL);

        let (record_type, shape_props) = if kind == "geo" || LEGACY_GEO_TYPES.contains(&kind) {
            let geo = if kind == "geo" {
                str_or(props, "geo", "rectangle")
            } else {
                kind.to_string()
            };
            ("geo", ShapeProps::Geo(geo_props(props, geo)))
        } else if kind == "arrow" {
            for terminal in ["start", "end"] {
                if let Some(binding) = resolve_binding(props, terminal, &canvas_id, &id_map) {
                    result.bindings.push(binding);
                }
            }
            ("arrow", ShapeProps::Arrow(arrow_props(props)))
        } else if kind == "text" {
            ("text", ShapeProps::Text(text_props(props)))
        } else {
            warn!("Unknown shape type '{kind}', skipping");
            result.skipped += 1;
            continue;
        };

        result.shapes.push(ShapeRecord {
            id: canvas_id,
            type_name: "shape",
            shape_type: record_type,
            x: num_or(shape, "x", 0.0),
            y: num_or(shape, "y", 0.0),
            rotation: num_or(shape, "rotation", 0.0),
            is_locked: bool_or(shape, "isLocked", false),
            opacity: num_or(shape, "opacity", 1.0),
            index: shape
                .get("index")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(random_index),
            parent_id: PAGE_ID,
            meta: Map::new(),
            props: shape_props,
        });
    }
    result
}

fn geo_props(props: &Value, geo: String) -> GeoProps {
    GeoProps {
        geo,
        w: num_or(props, "w", 100.0),
        h: num_or(props, "h", 100.0),
        color: map_color(&str_or(props, "color", "black")),
        label_color: map_color(&str_or(props, "labelColor", "black")),
        fill: str_or(props, "fill", "solid"),
        dash: str_or(props, "dash", "draw"),
        size: str_or(props, "size", "m"),
        font: str_or(props, "font", "draw"),
        align: map_align(&str_or(props, "align", "middle")),
        vertical_align: map_vertical_align(&str_or(props, "verticalAlign", "middle")),
        url: str_or(props, "url", ""),
        grow_y: num_or(props, "growY", 0.0),
        scale: num_or(props, "scale", 1.0),
        rich_text: rich_text_of(props),
    }
}

fn arrow_props(props: &Value) -> ArrowProps {
    ArrowProps {
        dash: str_or(props, "dash", "draw"),
        size: str_or(props, "size", "m"),
        fill: str_or(props, "fill", "none"),
        color: map_color(&str_or(props, "color", "black")),
        label_color: map_color(&str_or(props, "labelColor", "black")),
        bend: num_or(props, "bend", 0.0),
        start: Point { x: 0.0, y: 0.0 },
        end: Point { x: 100.0, y: 100.0 },
        label_position: 0.5,
        scale: 1.0,
        arrowhead_start: str_or(props, "arrowheadStart", "none"),
        arrowhead_end: str_or(props, "arrowheadEnd", "arrow"),
        text: str_or(props, "text", ""),
        font: str_or(props, "font", "draw"),
    }
}

fn text_props(props: &Value) -> TextProps {
    TextProps {
        color: map_color(&str_or(props, "color", "black")),
        size: str_or(props, "size", "m"),
        font: str_or(props, "font", "draw"),
        text_align: map_text_align(&str_or(props, "textAlign", "middle")),
        w: num_or(props, "w", 200.0),
        auto_size: bool_or(props, "autoSize", true),
        scale: num_or(props, "scale", 1.0),
        rich_text: rich_text_of(props),
    }
}

/// A binding for one arrow terminal, if it names a shape from this batch.
fn resolve_binding(
    props: &Value,
    terminal: &'static str,
    arrow_id: &str,
    id_map: &HashMap<String, String>,
) -> Option<BindingRecord> {
    let end = props.get(terminal)?;
    if end.get("type").and_then(Value::as_str) != Some("binding") {
        return None;
    }
    let bound = end.get("boundShapeId").and_then(scalar_string)?;
    let Some(to_id) = id_map.get(&bound) else {
        warn!("Arrow {arrow_id} {terminal} bound to unknown shape '{bound}'");
        return None;
    };

    let anchor = end.get("normalizedAnchor").unwrap_or(&NULL);
    Some(BindingRecord {
        id: new_id("binding"),
        type_name: "binding",
        binding_type: "arrow",
        from_id: arrow_id.to_string(),
        to_id: to_id.clone(),
        meta: Map::new(),
        props: BindingProps {
            terminal,
            normalized_anchor: Point {
                x: num_or(anchor, "x", 0.5),
                y: num_or(anchor, "y", 0.5),
            },
            is_exact: bool_or(end, "isExact", false),
            is_precise: false,
        },
    })
}

/// Rich text as given, or a document built from plain `text`.
fn rich_text_of(props: &Value) -> Value {
    match props.get("richText") {
        Some(rich) if !rich.is_null() => rich.clone(),
        _ => to_rich_text(&str_or(props, "text", "")),
    }
}

/// One paragraph per line; empty lines become empty paragraphs.
pub fn to_rich_text(text: &str) -> Value {
    let paragraphs: Vec<Value> = text
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                json!({ "type": "paragraph" })
            } else {
                json!({ "type": "paragraph", "content": [{ "type": "text", "text": line }] })
            }
        })
        .collect();
    json!({ "type": "doc", "content": paragraphs })
}

/// Ids may arrive as strings or numbers; empty strings do not count.
fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn source_id(shape: &Value) -> Option<String> {
    shape.get("id").and_then(scalar_string)
}

fn shape_type(shape: &Value) -> Option<&str> {
    shape
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
}

fn str_or(v: &Value, key: &str, default: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn num_or(v: &Value, key: &str, default: f64) -> f64 {
    v.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn bool_or(v: &Value, key: &str, default: bool) -> bool {
    v.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}:{}", Uuid::new_v4().simple())
}

/// Fractional index `a` + 8 base-36 characters.
fn random_index() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let bytes = Uuid::new_v4();
    let suffix: String = bytes.as_bytes()[..8]
        .iter()
        .map(|b| ALPHABET[(*b as usize) % ALPHABET.len()] as char)
        .collect();
    format!("a{suffix}")
}
