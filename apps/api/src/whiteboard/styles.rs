//! Clamps free-form style keywords onto the canvas library's enumerations.
//! Input is matched case-insensitively; anything unrecognized falls back to
//! the documented default.

const VALID_COLORS: &[&str] = &[
    "black",
    "grey",
    "light-violet",
    "violet",
    "blue",
    "light-blue",
    "yellow",
    "orange",
    "green",
    "light-green",
    "light-red",
    "red",
    "white",
];

const COLOR_ALIASES: &[(&str, &str)] = &[
    ("purple", "violet"),
    ("gray", "grey"),
    ("lightblue", "light-blue"),
    ("lightviolet", "light-violet"),
    ("lightgreen", "light-green"),
    ("lightred", "light-red"),
];

const VALID_ALIGNS: &[&str] = &[
    "start",
    "middle",
    "end",
    "start-legacy",
    "middle-legacy",
    "end-legacy",
];

const ALIGN_ALIASES: &[(&str, &str)] = &[("left", "start"), ("center", "middle"), ("right", "end")];

const VALID_VERTICAL_ALIGNS: &[&str] = &["start", "middle", "end"];

const VERTICAL_ALIGN_ALIASES: &[(&str, &str)] = &[
    ("top", "start"),
    ("center", "middle"),
    ("bottom", "end"),
];

/// Text shapes accept only the plain three alignments.
const VALID_TEXT_ALIGNS: &[&str] = &["start", "middle", "end"];

fn clamp(
    input: &str,
    valid: &'static [&'static str],
    aliases: &[(&str, &'static str)],
    default: &'static str,
) -> &'static str {
    let needle = input.trim().to_lowercase();
    if let Some(v) = valid.iter().find(|v| **v == needle) {
        return *v;
    }
    aliases
        .iter()
        .find(|(from, _)| *from == needle)
        .map(|(_, to)| *to)
        .unwrap_or(default)
}

pub fn map_color(color: &str) -> &'static str {
    clamp(color, VALID_COLORS, COLOR_ALIASES, "black")
}

pub fn map_align(align: &str) -> &'static str {
    clamp(align, VALID_ALIGNS, ALIGN_ALIASES, "middle")
}

pub fn map_vertical_align(align: &str) -> &'static str {
    clamp(align, VALID_VERTICAL_ALIGNS, VERTICAL_ALIGN_ALIASES, "middle")
}

pub fn map_text_align(align: &str) -> &'static str {
    clamp(align, VALID_TEXT_ALIGNS, ALIGN_ALIASES, "middle")
}
