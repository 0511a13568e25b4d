use std::path::PathBuf;

use thiserror::Error;

/// A structurally invalid command declaration.
/// Raised while compiling a command; indicates a bug in the declaration rather than bad user input.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// An `Option<T>` parameter declared without a default.
    #[error("parameter '{name}' is declared {declared} but has no default.")]
    OptionalWithoutDefault {
        /// The parameter name.
        name: String,
        /// The declared type.
        declared: String,
    },
    /// A required toggle on a command which also reads a config file.
    #[error("boolean parameter '{name}' has no default, which cannot be combined with the config file flag '--{config_flag}'.")]
    BooleanWithoutDefault {
        /// The parameter name.
        name: String,
        /// The command's config file flag.
        config_flag: String,
    },
    /// An environment variable binding on a parameter without a default to replace.
    #[error("parameter '{name}' binds the environment variable '{envvar}' but has no default.")]
    EnvvarWithoutDefault {
        /// The parameter name.
        name: String,
        /// The bound environment variable.
        envvar: String,
    },
    /// An enumeration parameter whose type has no members.
    #[error("parameter '{name}' is the enumeration {type_name}, which has no members.")]
    EmptyEnumeration {
        /// The parameter name.
        name: String,
        /// The enumeration's type name.
        type_name: &'static str,
    },
    /// A type with no registered action.
    #[error("parameter '{name}' has the unsupported type {declared}.")]
    UnsupportedType {
        /// The parameter name.
        name: String,
        /// The declared type.
        declared: String,
    },
    /// A literal or environment default which failed coercion.
    #[error("parameter '{name}' has an invalid default: {source}")]
    InvalidDefault {
        /// The parameter name.
        name: String,
        /// Why the default was rejected.
        source: ValidationError,
    },
    /// A parameter name which cannot be spelled as a flag.
    #[error("parameter name '{name}' is not an identifier.")]
    InvalidName {
        /// The parameter name.
        name: String,
    },
    /// A parameter, flag or sub-command named `help`.
    #[error("name '{name}' is reserved for the help message.")]
    ReservedName {
        /// The reserved name.
        name: String,
    },
    /// Two parameters, or two of their flags, which share a name.
    #[error("command '{command}' declares '{name}' more than once.")]
    DuplicateParameter {
        /// The command name.
        command: String,
        /// The repeated name.
        name: String,
    },
    /// Two sub-commands which share a name.
    #[error("command '{name}' is registered more than once.")]
    DuplicateCommand {
        /// The command name.
        name: String,
    },
    /// Path checks which leave `readable` or `writable` unstated.
    #[error("parameter '{name}' configures path checks without stating both 'readable' and 'writable'.")]
    ImplicitPathAccess {
        /// The parameter name.
        name: String,
    },
}

/// A raw value (from the command line, the environment or a config file) that failed coercion.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("argument {destination}: {reason}")]
pub struct ValidationError {
    destination: String,
    raw: String,
    reason: String,
}

impl ValidationError {
    /// Reject the `raw` value destined for the parameter `destination`.
    /// Custom [`Action`](crate::Action)s report their failures this way.
    pub fn new(
        destination: impl Into<String>,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// The parameter the value was destined for.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The offending value, as it was received.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Parameters that remained without a value after merging the config file with the command line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("the following mandatory config params have not been passed: {}", .missing.join(", "))]
pub struct MissingConfigValue {
    missing: Vec<String>,
}

impl MissingConfigValue {
    pub(crate) fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }

    /// The names of all the unfilled parameters, in declaration order.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }
}

/// A config file which could not be read as a flat document.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read.
    #[error("cannot read config file '{}': {source}", .path.display())]
    Unreadable {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
    /// The file is neither valid JSON nor valid TOML.
    #[error("cannot parse config file '{}': {message}", .path.display())]
    Malformed {
        /// The config file.
        path: PathBuf,
        /// The parser's description of the problem.
        message: String,
    },
    /// The document is valid, but not a table of keys to values.
    #[error("config file '{}' must contain a flat key/value table.", .path.display())]
    NotATable {
        /// The config file.
        path: PathBuf,
    },
}

/// Any error raised by `signet` itself.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// See [`MissingConfigValue`].
    #[error(transparent)]
    MissingConfigValue(#[from] MissingConfigValue),
    /// See [`ConfigFileError`].
    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),
}

impl Error {
    /// The process exit code which represents this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration(_) => 1,
            _ => 2,
        }
    }
}

/// A handler asked [`Arguments`](crate::Arguments) for a value it does not hold.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// No value was resolved under the name.
    #[error("no argument named '{name}'.")]
    Missing {
        /// The requested name.
        name: String,
    },
    /// The resolved value has a different shape than the requested type.
    #[error("argument '{name}' holds a {actual} value, which cannot convert to {expected}.")]
    Mismatch {
        /// The requested name.
        name: String,
        /// The kind of the resolved value.
        actual: &'static str,
        /// The requested type.
        expected: &'static str,
    },
}
