//! Tolerant parsing of the model's JSON reply.
//!
//! The reply is untrusted: each field is read on its own and dropped if its
//! shape is wrong, so one bad field never discards the rest.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use sehat_core::models::assessment::{Assessment, AssessmentOutcome};

/// Parse a model reply into an [`AssessmentOutcome`].
///
/// A body that is empty, not valid JSON, or valid JSON but not an object
/// yields [`AssessmentOutcome::Unavailable`]. A Markdown code fence around
/// the JSON is tolerated.
pub fn parse_assessment(text: &str) -> AssessmentOutcome {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return AssessmentOutcome::Unavailable {
            reason: "model returned an empty response".to_string(),
        };
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            return AssessmentOutcome::Unavailable {
                reason: format!("response is not valid JSON: {e}"),
            };
        }
    };

    match value {
        Value::Object(map) => AssessmentOutcome::Assessed(assessment_from_map(&map)),
        other => AssessmentOutcome::Unavailable {
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        },
    }
}

fn assessment_from_map(map: &Map<String, Value>) -> Assessment {
    Assessment {
        risk_score: map.get("risk_score").and_then(read_score),
        risk_category: map.get("risk_category").and_then(read_text),
        recommendations: map.get("recommendations").and_then(read_text),
        consultation_doctor: map.get("consultation_doctor").and_then(read_text),
        image_analysis: map.get("image_analysis").and_then(read_text),
        feature_importance: map.get("feature_importance").and_then(read_weights),
    }
}

/// Integer score. Floats are rounded; numeric strings are accepted.
fn read_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(round_finite)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(round_finite))
        }
        _ => None,
    }
}

fn round_finite(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.round() as i64)
}

/// Free text. A list of strings is joined one item per line.
fn read_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let lines: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            lines.map(|lines| lines.join("\n"))
        }
        _ => None,
    }
}

/// Factor → weight map. Non-numeric weights are dropped.
fn read_weights(value: &Value) -> Option<BTreeMap<String, f64>> {
    let map = value.as_object()?;
    Some(
        map.iter()
            .filter_map(|(factor, weight)| weight.as_f64().map(|w| (factor.clone(), w)))
            .collect(),
    )
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
