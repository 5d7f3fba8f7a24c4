//! Score normalization.
//!
//! Backend scores arrive as whatever the model chose to emit: integers, floats,
//! quoted numbers, `null`, or prose. Everything is coerced to an integer in `0..=100`.

use serde_json::Value;

pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 100;

/// Numeric coercion of a JSON value. Floats truncate toward zero; strings must hold an integer.
pub fn coerce(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Bounds an integer to the score range.
pub fn clamp_int(value: i64) -> u8 {
    // Range is 0..=100 so the cast is lossless.
    value.clamp(SCORE_MIN, SCORE_MAX) as u8
}

/// Coerces and bounds a raw score. Anything non-numeric becomes `0`.
pub fn clamp(value: &Value) -> u8 {
    coerce(value).map(clamp_int).unwrap_or(0)
}

/// Human-readable reading of a confidence score.
pub fn explain_score(score: u8) -> &'static str {
    match score {
        80.. => "Very confident & emotionally stable",
        60..=79 => "Moderate confidence with mild emotional tension",
        40..=59 => "Emotionally uncertain or guarded",
        _ => "High emotional stress or defensiveness detected",
    }
}
