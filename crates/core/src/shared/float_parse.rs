use serde_json::Value;

/// Total numeric coercion for loosely-typed transcript fields.
///
/// Numbers pass through, numeric strings are parsed, anything else
/// (including NaN and infinities) becomes `0.0`.
pub fn parse_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    finite_or_zero(parsed)
}

/// Like [`parse_or_zero`], but distinguishes an absent or `null` field.
pub fn parse_optional(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(parse_or_zero(v)),
    }
}

pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}
