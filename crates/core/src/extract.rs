use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ParseError;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("valid fenced block regex"));

/// Tries, in order: the whole trimmed text, the first fenced code block,
/// then the span from the first `{` to the last `}`. Only objects count as
/// success; no other repair is attempted.
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    if let Some(object) = parse_object(trimmed) {
        return Ok(object);
    }

    if let Some(object) = FENCED_BLOCK
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .and_then(|inner| parse_object(inner.as_str().trim()))
    {
        return Ok(object);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Some(object) = parse_object(&trimmed[start..=end]) {
                return Ok(object);
            }
        }
    }

    Err(ParseError::NoJsonObject)
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
