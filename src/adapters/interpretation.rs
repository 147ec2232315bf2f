//! Interpreter replies to intent vectors.
//!
//! The upstream interpreter (an LLM) is asked for a JSON object with the six
//! intent keys and an `explanation`. Replies are not always clean: they may
//! wrap the object in prose or a code fence, omit keys, or quote numbers.
//! Missing or unreadable dimensions fall back to the neutral midpoint.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use crate::error::ValidationError;
use crate::intent::{Dimension, IntentVector, PartialIntent};

/// Value used for any intent dimension the interpreter did not supply.
pub const NEUTRAL_INTENT_LEVEL: f64 = 0.5;

/// A parsed interpreter reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Normalized intent.
    pub intent: IntentVector,
    /// Natural-language explanation (empty when absent).
    pub explanation: String,
    /// Dimensions that were filled with [`NEUTRAL_INTENT_LEVEL`].
    pub defaulted: Vec<Dimension>,
}

/// Fills every missing dimension with [`NEUTRAL_INTENT_LEVEL`].
///
/// # Examples
///
/// ```
/// use blendmatch::{normalize_intent, Dimension, PartialIntent};
///
/// let partial = PartialIntent::empty().with(Dimension::Focus, 0.9);
/// let intent = normalize_intent(&partial);
/// assert_eq!(intent.focus, 0.9);
/// assert_eq!(intent.relaxation, 0.5);
/// ```
#[must_use]
pub fn normalize_intent(partial: &PartialIntent) -> IntentVector {
    partial.fill(NEUTRAL_INTENT_LEVEL)
}

/// Positions where a JSON object may begin: a brace followed by a quoted key
/// or the closing brace. Skips prose such as `{key: value}`.
fn object_start_regex() -> Result<&'static Regex, ValidationError> {
    static RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\{\s*["}]"#))
        .as_ref()
        .map_err(|e| ValidationError::InvalidInterpretation {
            reason: format!("object pattern failed to compile: {e}"),
        })
}

fn locate_object(reply: &str) -> Result<Map<String, JsonValue>, ValidationError> {
    if let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(reply.trim()) {
        return Ok(map);
    }

    // First candidate that parses wins; whatever follows it is ignored.
    let mut last_error = None;
    for start in object_start_regex()?.find_iter(reply) {
        let mut values =
            serde_json::Deserializer::from_str(&reply[start.start()..]).into_iter::<JsonValue>();
        match values.next() {
            Some(Ok(JsonValue::Object(map))) => return Ok(map),
            Some(Err(e)) => last_error = Some(e.to_string()),
            _ => {}
        }
    }

    Err(ValidationError::InvalidInterpretation {
        reason: last_error.unwrap_or_else(|| "no JSON object in reply".to_string()),
    })
}

fn numeric(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Parses an interpreter reply into a normalized intent.
///
/// # Errors
///
/// Returns `ValidationError::InvalidInterpretation` only when no JSON object
/// can be found in the reply. Missing or non-numeric fields are defaulted.
pub fn parse_interpretation(reply: &str) -> Result<Interpretation, ValidationError> {
    let object = locate_object(reply)?;

    let mut partial = PartialIntent::empty();
    let mut defaulted = Vec::new();
    for dim in Dimension::ALL {
        match object.get(dim.key()).and_then(numeric) {
            Some(v) => partial = partial.with(dim, v),
            None => defaulted.push(dim),
        }
    }
    if !defaulted.is_empty() {
        warn!(?defaulted, "interpreter reply missing intent fields, using neutral level");
    }

    let explanation = object
        .get("explanation")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Interpretation {
        intent: normalize_intent(&partial),
        explanation,
        defaulted,
    })
}
