//! Field-level decoding shared by the queries.
//!
//! Every accessor names the field and the record it came from so a schema
//! error points at the offending entry.

use serde_json::{Map, Value};

use crate::error::{CoinGeckoError, Result};

pub(crate) fn schema(msg: String) -> CoinGeckoError {
    CoinGeckoError::Schema(msg)
}

/// A required string field.
pub(crate) fn require_str(obj: &Map<String, Value>, key: &str, ctx: &str) -> Result<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(schema(format!(
            "{}: field '{}' is not a string (got {})",
            ctx, key, other
        ))),
        None => Err(schema(format!("{}: missing field '{}'", ctx, key))),
    }
}

/// Coerce a JSON number, or a string holding one, to `f64`.
///
/// `null`, booleans, arrays and objects are rejected.
pub(crate) fn coerce_f64(value: Option<&Value>, what: &str, ctx: &str) -> Result<f64> {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| schema(format!("{}: {} {} is not representable as f64", ctx, what, n))),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            schema(format!("{}: {} {:?} is not numeric", ctx, what, s))
        }),
        Some(Value::Null) => Err(schema(format!("{}: {} is null", ctx, what))),
        Some(other) => Err(schema(format!(
            "{}: {} is not numeric (got {})",
            ctx, what, other
        ))),
        None => Err(schema(format!("{}: missing {}", ctx, what))),
    }
}

/// A required numeric field of an object.
pub(crate) fn require_f64(obj: &Map<String, Value>, key: &str, ctx: &str) -> Result<f64> {
    coerce_f64(obj.get(key), &format!("field '{}'", key), ctx)
}

/// Short JSON type name for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
