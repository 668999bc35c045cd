//! Model output repair for trend summaries
//!
//! The model is asked for a single JSON object but the raw output is never
//! trusted as-is. Repair is a pipeline of parsers tried in sequence, each
//! either producing a result or declining; the final stage always produces a
//! (possibly empty) result, never an error.
//!
//! 1. Strip fenced code-block markers (the fenced content is kept) and
//!    stray role tokens.
//! 2. Parse the first `{` .. last `}` span as JSON.
//! 3. Fall back to section-header extraction: per key, the text between its
//!    label and the next label, as bullet-prefixed lines or the first few
//!    non-empty lines.
//! 4. All four keys empty — a valid result.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum entries kept per section
const MAX_SECTION_ITEMS: usize = 6;

/// Repaired summary content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySections {
    pub bullets: Vec<String>,
    pub key_stats: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

impl SummarySections {
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
            && self.key_stats.is_empty()
            && self.risks.is_empty()
            && self.opportunities.is_empty()
    }
}

fn fence_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*```[^\n]*$").expect("valid fence pattern"))
}

fn role_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:system|user|assistant)\b\s*").expect("valid role pattern"))
}

fn bullet_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*[-*•]\s*(.+)$").expect("valid bullet pattern"))
}

/// Stage 1: drop fence markers (keeping fenced content) and role tags
fn strip_markers(raw: &str) -> String {
    let without_fences = fence_line().replace_all(raw, "");
    role_token().replace_all(&without_fences, "").into_owned()
}

/// Stage 2: parse the outermost brace span as JSON, or decline
fn parse_json_span(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Pull a string array out of a parsed JSON object, ignoring non-strings
fn string_array(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_string())
                .take(MAX_SECTION_ITEMS)
                .collect()
        })
        .unwrap_or_default()
}

fn squeeze(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stage 3: capture the block between `key:` and the next label (or end),
/// then pull bullet lines — or the first few non-empty lines verbatim.
fn grab_section(text: &str, key: &str) -> Vec<String> {
    let pattern = format!(r"(?i){}\s*[:：]\s*([\s\S]*?)(?:\n\s*\w+\s*[:：]|\z)", key);
    let Ok(regex) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let Some(caps) = regex.captures(text) else {
        return Vec::new();
    };
    let block = &caps[1];

    let mut items: Vec<String> = bullet_line()
        .captures_iter(block)
        .map(|c| squeeze(&c[1]))
        .collect();

    if items.is_empty() {
        items = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(MAX_SECTION_ITEMS)
            .map(squeeze)
            .collect();
    }

    items.retain(|i| !i.is_empty());
    items.truncate(MAX_SECTION_ITEMS);
    items
}

/// Repair raw model output into the four summary sections
///
/// Returns the sections and the value to record as the raw response: the
/// parsed JSON object when stage 2 succeeded, otherwise the sections
/// themselves.
pub fn repair_summary(raw: &str) -> (SummarySections, Value) {
    let cleaned = strip_markers(raw);

    if let Some(value) = parse_json_span(&cleaned) {
        let sections = SummarySections {
            bullets: string_array(&value, "bullets"),
            key_stats: string_array(&value, "key_stats"),
            risks: string_array(&value, "risks"),
            opportunities: string_array(&value, "opportunities"),
        };
        return (sections, value);
    }

    let sections = SummarySections {
        bullets: grab_section(&cleaned, "bullets"),
        key_stats: grab_section(&cleaned, "key_stats"),
        risks: grab_section(&cleaned, "risks"),
        opportunities: grab_section(&cleaned, "opportunities"),
    };

    let value = serde_json::to_value(&sections).unwrap_or(Value::Null);
    (sections, value)
}
