use std::path::PathBuf;

use chrono::NaiveDateTime;
use uuid::Uuid;

/// A typed value flowing through the coercion [`Action`](crate::Action)s.
///
/// Raw command line input enters as [`Value::Str`].
/// Each `Action` turns it into the variant of its target type, leaving values already of that type untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value (ex: the `None` default of an `Option<T>` parameter).
    None,
    /// A boolean toggle.
    Bool(bool),
    /// A base-10 integer.
    Int(i64),
    /// An IEEE floating point number.
    Float(f64),
    /// Text; also the shape of all raw input.
    Str(String),
    /// A UUID.
    Uuid(Uuid),
    /// A filesystem path.
    Path(PathBuf),
    /// A naive (timezone-less) timestamp.
    Timestamp(NaiveDateTime),
    /// A member of an enumeration.
    Choice(Choice),
}

impl Value {
    /// The short name of this value's variant, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Uuid(_) => "uuid",
            Value::Path(_) => "path",
            Value::Timestamp(_) => "timestamp",
            Value::Choice(_) => "choice",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::Uuid(value) => write!(f, "{value}"),
            Value::Path(value) => write!(f, "{}", value.display()),
            Value::Timestamp(value) => write!(f, "{value}"),
            Value::Choice(choice) => write!(f, "{}", choice.value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

/// The selected member of an enumeration: its declaration index and stringified value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub(crate) index: usize,
    pub(crate) value: String,
}

impl Choice {
    pub(crate) fn new(index: usize, value: impl Into<String>) -> Self {
        Self {
            index,
            value: value.into(),
        }
    }

    /// The position of the member in its enumeration's declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The stringified value of the member.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The members of an enumeration, as seen by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    pub(crate) type_name: &'static str,
    pub(crate) values: Vec<String>,
}

impl EnumSpec {
    /// Describe an enumeration by its type name and the stringified value of each member, in declaration order.
    pub fn new(type_name: &'static str, values: Vec<String>) -> Self {
        Self { type_name, values }
    }

    /// The stringified member values.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The semantic type of a declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// A type resolved through the [`ActionRegistry`](crate::ActionRegistry) by its key (ex: `"int"`).
    Named(&'static str),
    /// A `--name`/`--no-name` toggle.
    Boolean,
    /// A closed set of members.
    Enumeration(EnumSpec),
    /// A nullable `T`; must be declared with a default.
    Optional(Box<DeclaredType>),
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredType::Named(key) => write!(f, "{key}"),
            DeclaredType::Boolean => write!(f, "bool"),
            DeclaredType::Enumeration(spec) => write!(f, "{}", spec.type_name),
            DeclaredType::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

/// The registry keys of the built-in types.
pub mod types {
    /// `i64`.
    pub const INT: &str = "int";
    /// `f64`.
    pub const FLOAT: &str = "float";
    /// `String`.
    pub const STR: &str = "str";
    /// `uuid::Uuid`.
    pub const UUID: &str = "uuid";
    /// `std::path::PathBuf`.
    pub const PATH: &str = "path";
    /// `chrono::NaiveDateTime`.
    pub const TIMESTAMP: &str = "timestamp";
}
