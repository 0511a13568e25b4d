use crate::api::{Argument, Declared};
use crate::model::{DeclaredType, Value};

/// The erased form of a [`Parameter`], read by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParameterDescriptor {
    pub(crate) name: String,
    pub(crate) declared: DeclaredType,
    pub(crate) default: Option<Value>,
    pub(crate) argument: Option<Argument>,
}

/// One parameter of a [`Command`](crate::Command), declared with the Rust type `T` it is handed over as.
///
/// A parameter without a default is positional (and so mandatory).
/// A parameter with a default is exposed as the option `--name`.
/// Boolean parameters are always toggles: `--name` / `--no-name`.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{Argument, Parameter};
///
/// let name = Parameter::<String>::new("name");
/// let age = Parameter::<i64>::new("age")
///     .default(14)
///     .argument(Argument::new().help("The user's age."));
/// let nickname = Parameter::<Option<String>>::new("nickname").default(None);
/// ```
#[derive(Debug)]
pub struct Parameter<T> {
    name: String,
    default: Option<T>,
    argument: Option<Argument>,
}

impl<T: Declared> Parameter<T> {
    /// Create a parameter with the identifier `name`.
    /// Underscores are shown as hyphens on the Cli (ex: `is_rainy` is `--is-rainy`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            argument: None,
        }
    }

    /// Declare the default value for this parameter.
    /// If repeated, only the final default will apply.
    pub fn default(mut self, value: impl Into<T>) -> Self {
        self.default.replace(value.into());
        self
    }

    /// Attach the extended [`Argument`] options to this parameter.
    /// If repeated, only the final argument will apply.
    pub fn argument(mut self, argument: Argument) -> Self {
        self.argument.replace(argument);
        self
    }

    pub(crate) fn consume(self) -> ParameterDescriptor {
        ParameterDescriptor {
            name: self.name,
            declared: T::declared_type(),
            default: self.default.map(Declared::into_value),
            argument: self.argument,
        }
    }
}

impl Parameter<String> {
    /// Create a parameter which declares no type.
    /// It is treated as text.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name)
    }
}

impl ParameterDescriptor {
    #[cfg(test)]
    pub(crate) fn new(name: &str, declared: DeclaredType) -> Self {
        Self {
            name: name.to_string(),
            declared,
            default: None,
            argument: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_default(mut self, default: Value) -> Self {
        self.default.replace(default);
        self
    }

    #[cfg(test)]
    pub(crate) fn with_argument(mut self, argument: Argument) -> Self {
        self.argument.replace(argument);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types;
    use std::path::PathBuf;

    #[test]
    fn positional() {
        let descriptor = Parameter::<i64>::new("age").consume();
        assert_eq!(
            descriptor,
            ParameterDescriptor {
                name: "age".to_string(),
                declared: DeclaredType::Named(types::INT),
                default: None,
                argument: None,
            }
        );
    }

    #[test]
    fn named_is_text() {
        let descriptor = Parameter::named("name").consume();
        assert_eq!(descriptor.declared, DeclaredType::Named(types::STR));
        assert_eq!(descriptor.default, None);
    }

    #[test]
    fn default_final_wins() {
        let descriptor = Parameter::<String>::new("name")
            .default("--this will get discarded--")
            .default("World")
            .consume();
        assert_eq!(descriptor.default, Some(Value::Str("World".to_string())));
    }

    #[test]
    fn optional_default() {
        let descriptor = Parameter::<Option<PathBuf>>::new("output")
            .default(None)
            .consume();
        assert_eq!(
            descriptor.declared,
            DeclaredType::Optional(Box::new(DeclaredType::Named(types::PATH)))
        );
        assert_eq!(descriptor.default, Some(Value::None));
    }

    #[test]
    fn argument_attached() {
        let descriptor = Parameter::<bool>::new("is_rainy")
            .default(false)
            .argument(Argument::new().help("Whether it rains."))
            .consume();
        assert_eq!(descriptor.declared, DeclaredType::Boolean);
        assert_eq!(descriptor.default, Some(Value::Bool(false)));
        assert_eq!(
            descriptor.argument,
            Some(Argument::new().help("Whether it rains."))
        );
    }
}
