use crate::action::{PathChecks, DEFAULT_TIMESTAMP_FORMATS};
use crate::error::ConfigurationError;

/// Extended parsing and validation options for one parameter.
///
/// An `Argument` is attached to a [`Parameter`](crate::Parameter) and provides:
/// * The help line shown by `--help`.
/// * The environment variable from which to read the parameter's default.
/// * Validation options for path parameters.
/// * The accepted formats for timestamp parameters.
///
/// Options which do not apply to the parameter's type are ignored.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::Argument;
///
/// let argument = Argument::new()
///     .help("The photo to develop.")
///     .envvar("PHOTO")
///     .exists(true)
///     .dir_okay(false)
///     .readable(true)
///     .writable(false);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argument {
    help: Option<String>,
    envvar: Option<String>,
    exists: Option<bool>,
    file_okay: Option<bool>,
    dir_okay: Option<bool>,
    writable: Option<bool>,
    readable: Option<bool>,
    resolve_path: Option<bool>,
    formats: Option<Vec<String>>,
}

impl Argument {
    /// Create an argument with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document the help message for the parameter.
    /// If repeated, only the final message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Read the parameter's default from the environment variable `name`, when it is set.
    /// Only valid on parameters which declare a default.
    pub fn envvar(mut self, name: impl Into<String>) -> Self {
        self.envvar.replace(name.into());
        self
    }

    /// Reject paths which do not exist.
    pub fn exists(mut self, exists: bool) -> Self {
        self.exists.replace(exists);
        self
    }

    /// Whether to accept paths which are files.
    pub fn file_okay(mut self, file_okay: bool) -> Self {
        self.file_okay.replace(file_okay);
        self
    }

    /// Whether to accept paths which are directories.
    pub fn dir_okay(mut self, dir_okay: bool) -> Self {
        self.dir_okay.replace(dir_okay);
        self
    }

    /// Whether to reject paths which are not writable.
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable.replace(writable);
        self
    }

    /// Whether to reject paths which are not readable.
    pub fn readable(mut self, readable: bool) -> Self {
        self.readable.replace(readable);
        self
    }

    /// Whether to resolve paths to absolute before validating them.
    pub fn resolve_path(mut self, resolve_path: bool) -> Self {
        self.resolve_path.replace(resolve_path);
        self
    }

    /// The `strftime` formats accepted for a timestamp, tried in the given order.
    pub fn formats<I>(mut self, formats: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.formats
            .replace(formats.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub(crate) fn envvar_name(&self) -> Option<&str> {
        self.envvar.as_deref()
    }

    /// The path checks described by this argument.
    ///
    /// Readability and writability have no implied setting.
    /// Once any path option is configured, both must be stated explicitly.
    pub(crate) fn path_checks(&self, name: &str) -> Result<PathChecks, ConfigurationError> {
        let configured = [
            self.exists,
            self.file_okay,
            self.dir_okay,
            self.writable,
            self.readable,
            self.resolve_path,
        ]
        .iter()
        .any(Option::is_some);

        if !configured {
            return Ok(PathChecks::default());
        }

        match (self.readable, self.writable) {
            (Some(readable), Some(writable)) => {
                let defaults = PathChecks::default();
                Ok(PathChecks {
                    exists: self.exists.unwrap_or(defaults.exists),
                    file_okay: self.file_okay.unwrap_or(defaults.file_okay),
                    dir_okay: self.dir_okay.unwrap_or(defaults.dir_okay),
                    readable,
                    writable,
                    resolve_path: self.resolve_path.unwrap_or(defaults.resolve_path),
                })
            }
            _ => Err(ConfigurationError::ImplicitPathAccess {
                name: name.to_string(),
            }),
        }
    }

    pub(crate) fn timestamp_formats(&self) -> Vec<String> {
        match &self.formats {
            Some(formats) => formats.clone(),
            None => DEFAULT_TIMESTAMP_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}
