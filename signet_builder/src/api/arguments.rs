use std::collections::BTreeMap;

use crate::api::Declared;
use crate::error::ExtractError;
use crate::model::Value;

/// The resolved values of one command invocation, keyed by parameter name.
///
/// Every declared parameter holds a value by the time a handler receives the `Arguments`.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{Arguments, Value};
///
/// let mut arguments: Arguments = [("age".to_string(), Value::Int(14))].into_iter().collect();
/// let age: i64 = arguments.get("age").unwrap();
/// assert_eq!(age, 14);
/// let age: i64 = arguments.take("age").unwrap();
/// assert!(arguments.take::<i64>("age").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
}

impl Arguments {
    /// Remove and convert the value of the parameter `name`.
    pub fn take<T: Declared>(&mut self, name: &str) -> Result<T, ExtractError> {
        let value = self
            .values
            .remove(name)
            .ok_or_else(|| ExtractError::Missing {
                name: name.to_string(),
            })?;
        convert(name, value)
    }

    /// Convert a copy of the value of the parameter `name`.
    pub fn get<T: Declared>(&self, name: &str) -> Result<T, ExtractError> {
        let value = self
            .values
            .get(name)
            .cloned()
            .ok_or_else(|| ExtractError::Missing {
                name: name.to_string(),
            })?;
        convert(name, value)
    }

    /// The raw value of the parameter `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The number of values held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the parameter names and their values, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }
}

fn convert<T: Declared>(name: &str, value: Value) -> Result<T, ExtractError> {
    let actual = value.kind();
    T::from_value(value).ok_or_else(|| ExtractError::Mismatch {
        name: name.to_string(),
        actual,
        expected: std::any::type_name::<T>(),
    })
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
