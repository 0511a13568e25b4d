//! Coercion rules, one per declared parameter type.
use crate::error::ValidationError;
use crate::model::Value;

mod enumeration;
mod path;
mod registry;
mod scalar;
mod timestamp;

pub(crate) use enumeration::{BooleanAction, EnumAction};
pub use path::{PathAction, PathChecks};
pub use registry::{ActionFactory, ActionRegistry};
pub use scalar::{FloatAction, IntAction, StrAction, UuidAction};
pub use timestamp::{TimestampAction, DEFAULT_TIMESTAMP_FORMATS};

/// A coercion/validation rule bound to one declared parameter type.
///
/// `process` must be idempotent: a value already of the target type is returned as-is, while a [`Value::Str`] is parsed.
/// Failures name the `destination` parameter and the offending raw value.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{Action, IntAction, Value};
///
/// let action = IntAction;
/// assert_eq!(action.process(Value::from("14"), "age").unwrap(), Value::Int(14));
/// assert_eq!(action.process(Value::Int(14), "age").unwrap(), Value::Int(14));
/// assert!(action.process(Value::from("fourteen"), "age").is_err());
/// ```
pub trait Action: std::fmt::Debug + Send + Sync {
    /// Coerce `raw` into this action's target type.
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError>;
}

pub(crate) fn invalid(
    destination: &str,
    raw: &Value,
    reason: impl std::fmt::Display,
) -> ValidationError {
    ValidationError::new(destination, raw.to_string(), reason.to_string())
}
