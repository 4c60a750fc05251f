//! Inline CSS declaration helpers.

use regex::Regex;
use std::sync::LazyLock;

static DECLARATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([-a-zA-Z]+)\s*:\s*([^;]*?)\s*(?:;|$)").unwrap());

static PX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d*\.?\d+)\s*(px)?\s*$").unwrap());

/// Parse a `style` attribute into `(property, value)` pairs.
///
/// Property names are lowercased; empty values are dropped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    DECLARATION_REGEX
        .captures_iter(style)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2)?.as_str().trim();
            (!value.is_empty()).then(|| (name, value.to_string()))
        })
        .collect()
}

/// Serialize declarations back into a `style` attribute value.
pub fn serialize_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a pixel length (`"12px"`, `"12"`, `"12.5px"`).
pub fn parse_px(value: &str) -> Option<f32> {
    PX_REGEX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f32>().ok())
}
