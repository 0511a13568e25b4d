use uuid::Uuid;

use crate::action::{invalid, Action};
use crate::error::ValidationError;
use crate::model::Value;

/// Parses base-10 integers into [`Value::Int`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntAction;

impl Action for IntAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        match raw {
            Value::Int(_) => Ok(raw),
            Value::Str(ref text) => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| invalid(destination, &raw, format!("invalid int value: '{text}'"))),
            _ => Err(invalid(
                destination,
                &raw,
                format!("invalid int value: '{raw}'"),
            )),
        }
    }
}

/// Parses IEEE floating point numbers into [`Value::Float`].
/// Integers widen.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatAction;

impl Action for FloatAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        match raw {
            Value::Float(_) => Ok(raw),
            Value::Int(value) => Ok(Value::Float(value as f64)),
            Value::Str(ref text) => text.trim().parse::<f64>().map(Value::Float).map_err(|_| {
                invalid(destination, &raw, format!("invalid float value: '{text}'"))
            }),
            _ => Err(invalid(
                destination,
                &raw,
                format!("invalid float value: '{raw}'"),
            )),
        }
    }
}

/// Accepts text verbatim.
/// Scalar values (ex: a number from a config file) are stringified.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrAction;

impl Action for StrAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        match raw {
            Value::Str(_) => Ok(raw),
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => Ok(Value::Str(raw.to_string())),
            _ => Err(invalid(
                destination,
                &raw,
                format!("invalid str value: '{raw}'"),
            )),
        }
    }
}

/// Parses canonical UUID text into [`Value::Uuid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAction;

impl Action for UuidAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        match raw {
            Value::Uuid(_) => Ok(raw),
            Value::Str(ref text) => Uuid::parse_str(text.trim())
                .map(Value::Uuid)
                .map_err(|_| invalid(destination, &raw, format!("invalid uuid value: '{text}'"))),
            _ => Err(invalid(
                destination,
                &raw,
                format!("invalid uuid value: '{raw}'"),
            )),
        }
    }
}
