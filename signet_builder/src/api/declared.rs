use std::path::PathBuf;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::model::{types, Choice, DeclaredType, EnumSpec, Value};

/// Behaviour for a Rust type to appear as a command parameter.
///
/// Implemented for `bool`, `i64`, `f64`, `String`, [`Uuid`], [`PathBuf`], [`NaiveDateTime`], and `Option<T>` of these.
/// Enumerations implement it via `#[derive(Enumeration)]` (or the [`enumeration`](crate::enumeration) helpers).
///
/// Custom types implement it by naming a registry key in [`DeclaredType::Named`], and registering that key on the
/// [`Application`](crate::Application).
pub trait Declared: Sized {
    /// The semantic type of the parameter.
    fn declared_type() -> DeclaredType;

    /// Convert a coerced value back into `Self`.
    /// Returns `None` when the value does not have this type's shape.
    fn from_value(value: Value) -> Option<Self>;

    /// Convert `self` into a value (ex: to declare a default).
    fn into_value(self) -> Value;
}

macro_rules! declared {
    ($type:ty, $declared:expr, $variant:ident) => {
        impl Declared for $type {
            fn declared_type() -> DeclaredType {
                $declared
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

declared!(bool, DeclaredType::Boolean, Bool);
declared!(i64, DeclaredType::Named(types::INT), Int);
declared!(f64, DeclaredType::Named(types::FLOAT), Float);
declared!(String, DeclaredType::Named(types::STR), Str);
declared!(Uuid, DeclaredType::Named(types::UUID), Uuid);
declared!(PathBuf, DeclaredType::Named(types::PATH), Path);
declared!(NaiveDateTime, DeclaredType::Named(types::TIMESTAMP), Timestamp);

impl<T: Declared> Declared for Option<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Optional(Box::new(T::declared_type()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::None => Some(None),
            value => T::from_value(value).map(Some),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Some(inner) => inner.into_value(),
            None => Value::None,
        }
    }
}

/// A closed set of members, each identified on the Cli by its stringified value.
///
/// Usually derived: `#[derive(Enumeration)]`.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{enumeration, Declared, DeclaredType, Enumeration, Value};
///
/// enum Color {
///     Red,
///     Green,
/// }
///
/// impl Enumeration for Color {
///     fn members() -> Vec<Self> {
///         vec![Color::Red, Color::Green]
///     }
///
///     fn value(&self) -> String {
///         match self {
///             Color::Red => "0".to_string(),
///             Color::Green => "1".to_string(),
///         }
///     }
/// }
///
/// impl Declared for Color {
///     fn declared_type() -> DeclaredType {
///         enumeration::declared_type::<Self>()
///     }
///
///     fn from_value(value: Value) -> Option<Self> {
///         enumeration::from_value(value)
///     }
///
///     fn into_value(self) -> Value {
///         enumeration::into_value(self)
///     }
/// }
/// ```
pub trait Enumeration: Sized {
    /// Every member, in declaration order.
    fn members() -> Vec<Self>;

    /// The stringified value of this member.
    fn value(&self) -> String;
}

/// Helpers to implement [`Declared`] for an [`Enumeration`].
pub mod enumeration {
    use super::*;

    /// The declared type of the enumeration `E`.
    pub fn declared_type<E: Enumeration>() -> DeclaredType {
        let type_name = std::any::type_name::<E>();
        let short_name = type_name.rsplit("::").next().unwrap_or(type_name);
        DeclaredType::Enumeration(EnumSpec::new(
            short_name,
            E::members().iter().map(Enumeration::value).collect(),
        ))
    }

    /// The member of `E` selected by `value`.
    pub fn from_value<E: Enumeration>(value: Value) -> Option<E> {
        match value {
            Value::Choice(choice) => E::members().into_iter().nth(choice.index()),
            _ => None,
        }
    }

    /// The value which selects `member`.
    pub fn into_value<E: Enumeration>(member: E) -> Value {
        let value = member.value();
        // Members are found by their value; an unknown position is re-matched by the enumeration's action.
        let index = E::members()
            .iter()
            .position(|m| m.value() == value)
            .unwrap_or(usize::MAX);
        Value::Choice(Choice::new(index, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    impl Enumeration for Color {
        fn members() -> Vec<Self> {
            vec![Color::Red, Color::Green, Color::Blue]
        }

        fn value(&self) -> String {
            match self {
                Color::Red => "0",
                Color::Green => "1",
                Color::Blue => "2",
            }
            .to_string()
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(bool::declared_type(), DeclaredType::Boolean);
        assert_eq!(i64::declared_type(), DeclaredType::Named(types::INT));
        assert_eq!(i64::from_value(Value::Int(3)), Some(3));
        assert_eq!(i64::from_value(Value::Float(3.0)), None);
        assert_eq!("x".to_string().into_value(), Value::Str("x".to_string()));
    }

    #[test]
    fn optional() {
        assert_eq!(
            Option::<f64>::declared_type(),
            DeclaredType::Optional(Box::new(DeclaredType::Named(types::FLOAT)))
        );
        assert_eq!(Option::<f64>::from_value(Value::None), Some(None));
        assert_eq!(Option::<f64>::from_value(Value::Float(1.5)), Some(Some(1.5)));
        assert_eq!(Option::<f64>::from_value(Value::Int(1)), None);
        assert_eq!(None::<f64>.into_value(), Value::None);
        assert_eq!(Some(2.0).into_value(), Value::Float(2.0));
    }

    #[test]
    fn enumeration_declared_type() {
        assert_eq!(
            enumeration::declared_type::<Color>(),
            DeclaredType::Enumeration(EnumSpec::new(
                "Color",
                vec!["0".to_string(), "1".to_string(), "2".to_string()]
            ))
        );
    }

    #[test]
    fn enumeration_values() {
        for member in Color::members() {
            let value = enumeration::into_value(member);
            let selected: Color = enumeration::from_value(value.clone()).unwrap();
            assert_eq!(enumeration::into_value(selected), value);
        }

        assert_eq!(
            enumeration::into_value(Color::Blue),
            Value::Choice(Choice::new(2, "2"))
        );
        assert_eq!(
            enumeration::from_value::<Color>(Value::Choice(Choice::new(1, "1"))),
            Some(Color::Green)
        );
        assert_eq!(enumeration::from_value::<Color>(Value::Int(1)), None);
    }
}
