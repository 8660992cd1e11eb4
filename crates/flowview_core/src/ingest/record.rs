//! Raw record normalization.
//!
//! # Responsibility
//! - Turn loosely shaped JSON record maps into typed `Step`/`Project` values.
//! - Decode `|`-joined list fields and numeric strings.
//!
//! # Invariants
//! - Parsing is total: malformed fields degrade to defaults, never errors.
//! - Blank list input yields an empty list, never `[""]`.
//! - Unparseable progress yields `0`.

use crate::model::project::{Project, ProjectStatus};
use crate::model::step::{Step, StepKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// One raw record as found in a source envelope's `data` array.
pub type RawRecord = Map<String, Value>;

/// Separator for list fields encoded as a single string.
pub const LIST_DELIMITER: char = '|';

static LEADING_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\+?(\d+)").expect("valid leading integer regex"));

/// Splits a `|`-joined list, trimming every item and dropping blank items.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a progress value with a `0` fallback.
///
/// Accepts JSON numbers and numeric strings. A string is read up to its first
/// non-digit, so `"45%"` is `45`. Negative, non-numeric, or missing input is
/// `0`. Every integer in `0..=u64::MAX` is kept exactly; longer digit runs
/// saturate at `u64::MAX`.
pub fn parse_progress(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(number)) => number.as_u64().unwrap_or_else(|| match number.as_f64() {
            // `as` saturates for floats above `u64::MAX`
            Some(float) if float.is_finite() && float > 0.0 => float.trunc() as u64,
            _ => 0,
        }),
        Some(Value::String(text)) => LEADING_INTEGER_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|digits| digits.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Builds a `Step` from a raw record.
pub fn parse_step(record: &RawRecord) -> Step {
    let mut step = Step::new(
        text_field(record, "id"),
        text_field(record, "title"),
        StepKind::from_raw(&text_field(record, "type")),
    );
    step.description = text_field(record, "description");
    step.details = text_field(record, "details");
    step.inputs = list_field(record, "inputs");
    step.outputs = list_field(record, "outputs");
    step.duration = text_field(record, "duration");
    step.owner = text_field(record, "owner");
    step.criteria = list_field(record, "criteria");
    step.outcomes = list_field(record, "outcomes");
    step.next_steps = list_field(record, "nextSteps");
    step
}

/// Builds a `Project` from a raw record.
pub fn parse_project(record: &RawRecord) -> Project {
    let mut project = Project::new(
        text_field(record, "id"),
        text_field(record, "name"),
        text_field(record, "currentStage"),
        ProjectStatus::from_raw(&text_field(record, "status")),
    );
    project.next_steps = text_field(record, "nextSteps");
    project.blocking_reason = optional_text_field(record, "blockingReason");
    project.progress = parse_progress(record.get("progress"));
    project
}

/// Reads a scalar field as text. Missing, null, and structured values are `""`.
fn text_field(record: &RawRecord, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn optional_text_field(record: &RawRecord, key: &str) -> Option<String> {
    let text = text_field(record, key);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Reads a list field, accepting either a `|`-joined string or a JSON array.
fn list_field(record: &RawRecord, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::String(text)) => split_list(text),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.trim().to_string()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_progress, split_list};
    use serde_json::json;

    #[test]
    fn split_list_trims_items() {
        assert_eq!(
            split_list(" Brief | Budget|Timeline "),
            vec!["Brief", "Budget", "Timeline"]
        );
    }

    #[test]
    fn split_list_blank_input_is_empty() {
        assert!(split_list("").is_empty());
        assert!(split_list("   \t ").is_empty());
        assert!(split_list(" | ").is_empty());
    }

    #[test]
    fn parse_progress_handles_numbers_and_strings() {
        assert_eq!(parse_progress(Some(&json!("45"))), 45);
        assert_eq!(parse_progress(Some(&json!(" 72 "))), 72);
        assert_eq!(parse_progress(Some(&json!("45%"))), 45);
        assert_eq!(parse_progress(Some(&json!(130))), 130);
        assert_eq!(parse_progress(Some(&json!(12.9))), 12);
    }

    #[test]
    fn parse_progress_falls_back_to_zero() {
        assert_eq!(parse_progress(None), 0);
        assert_eq!(parse_progress(Some(&json!(null))), 0);
        assert_eq!(parse_progress(Some(&json!("n/a"))), 0);
        assert_eq!(parse_progress(Some(&json!("-5"))), 0);
        assert_eq!(parse_progress(Some(&json!(-3))), 0);
        assert_eq!(parse_progress(Some(&json!([1, 2]))), 0);
    }

    #[test]
    fn parse_progress_keeps_values_beyond_u32() {
        assert_eq!(parse_progress(Some(&json!("5000000000"))), 5_000_000_000);
        assert_eq!(parse_progress(Some(&json!(5_000_000_000_u64))), 5_000_000_000);
    }

    #[test]
    fn parse_progress_saturates_past_u64() {
        assert_eq!(parse_progress(Some(&json!("99999999999999999999999"))), u64::MAX);
    }
}
