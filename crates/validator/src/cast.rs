//! Coercion of raw input values to declared field types.
//!
//! Input usually comes from a decoded request, so numbers and booleans often
//! arrive as strings. [`cast`] accepts the native JSON form and the common
//! string spellings, and rejects everything else with a [`CastError`].
//!
//! | type        | accepts                                                   |
//! |-------------|-----------------------------------------------------------|
//! | `string`    | strings                                                   |
//! | `integer`   | integers, floats without fraction, integer strings        |
//! | `float`     | numbers, float strings                                    |
//! | `boolean`   | booleans, `"true"`, `"false"`, `"1"`, `"0"`               |
//! | `map`       | objects                                                   |
//! | `array<T>`  | arrays whose every element casts to `T`                   |
//! | `any`       | everything                                                |
//!
//! `null` casts to `null` for every type; whether that is acceptable is the
//! required-field checker's business, not the caster's.

use serde_json::{Number, Value};

use crate::error::CastError;
use crate::types::FieldType;

/// Casts `value` to `ty`.
///
/// # Examples
///
/// ```rust
/// use paramcast_validator::{cast, FieldType};
/// use serde_json::json;
///
/// assert_eq!(cast(&FieldType::Integer, &json!("42")).unwrap(), json!(42));
/// assert_eq!(cast(&FieldType::Float, &json!("20.00")).unwrap(), json!(20.0));
/// assert!(cast(&FieldType::Float, &json!("string")).is_err());
/// ```
pub fn cast(ty: &FieldType, value: &Value) -> Result<Value, CastError> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let cast = match ty {
        FieldType::String => value.as_str().map(|s| Value::String(s.to_owned())),
        FieldType::Integer => cast_integer(value),
        FieldType::Float => cast_float(value),
        FieldType::Boolean => cast_boolean(value),
        FieldType::Map => value.is_object().then(|| value.clone()),
        FieldType::Array(inner) => return cast_array(ty, inner, value),
        FieldType::Any => Some(value.clone()),
        FieldType::Embed => None,
    };

    cast.ok_or_else(|| CastError::new(ty, value))
}

fn cast_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
        Value::Number(n) => {
            let f = n.as_f64()?;
            integral(f).map(Value::from)
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Value::from)
                .or_else(|_| s.parse::<u64>().map(Value::from))
                .ok()
        }
        _ => None,
    }
}

// `i64::MAX as f64` is 2^63, itself out of range.
fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn cast_float(value: &Value) -> Option<Value> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_float(s.trim())?,
        _ => return None,
    };
    Number::from_f64(f).map(Value::Number)
}

fn parse_float(s: &str) -> Option<f64> {
    // Rust's parser also accepts "inf" and "NaN", which are not numbers here.
    let looks_numeric = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !looks_numeric {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn cast_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn cast_array(ty: &FieldType, inner: &FieldType, value: &Value) -> Result<Value, CastError> {
    let Value::Array(items) = value else {
        return Err(CastError::new(ty, value));
    };

    items
        .iter()
        .map(|item| cast(inner, item).map_err(|_| CastError::new(ty, value)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}
