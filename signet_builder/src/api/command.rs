use crate::api::{Arguments, Declared, Parameter, ParameterDescriptor};

/// How a handler finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler ran to completion.
    Completed,
    /// The handler asked the program to stop early, without error.
    Exit,
}

/// Conversion of a handler's return value into an [`Outcome`].
///
/// Implemented for `()`, [`Outcome`], and `Result<T, E>` where `T: IntoOutcome` and `E` converts into [`anyhow::Error`].
pub trait IntoOutcome {
    /// Convert into the outcome, propagating any handler error.
    fn into_outcome(self) -> anyhow::Result<Outcome>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> anyhow::Result<Outcome> {
        Ok(Outcome::Completed)
    }
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> anyhow::Result<Outcome> {
        Ok(self)
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<anyhow::Error>,
{
    fn into_outcome(self) -> anyhow::Result<Outcome> {
        self.map_err(Into::into)?.into_outcome()
    }
}

pub(crate) type Handler = Box<dyn Fn(Arguments) -> anyhow::Result<Outcome>>;

/// A function exposed on the Cli: its name, its parameters, and the handler which receives their resolved values.
///
/// Usually generated by the `#[command]` attribute.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{Arguments, Command, Parameter};
///
/// let command = Command::new("hello", |mut arguments: Arguments| -> signet::anyhow::Result<()> {
///     let name: String = arguments.take("name")?;
///     let age: i64 = arguments.take("age")?;
///     println!("Hello {name}, you are {age}.");
///     Ok(())
/// })
/// .about("Greet the user.")
/// .parameter(Parameter::<String>::new("name"))
/// .parameter(Parameter::<i64>::new("age").default(14));
/// ```
pub struct Command {
    pub(crate) name: String,
    pub(crate) about: Option<String>,
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) config_flag: Option<String>,
    pub(crate) handler: Handler,
}

impl Command {
    /// Create a command with the `name` and `handler`.
    pub fn new<F, R>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Arguments) -> R + 'static,
        R: IntoOutcome,
    {
        Self {
            name: name.into(),
            about: None,
            parameters: Vec::default(),
            config_flag: None,
            handler: Box::new(move |arguments| handler(arguments).into_outcome()),
        }
    }

    /// Document the about message for this command.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add a parameter to the command.
    /// Positional parameters are matched in the order they are added.
    pub fn parameter<T: Declared>(mut self, parameter: Parameter<T>) -> Self {
        self.parameters.push(parameter.consume());
        self
    }

    /// Read parameter values from a config file, supplied on the Cli with `--<flag>`.
    ///
    /// Every parameter then becomes an option, so that it may be filled from the file or overridden on the Cli.
    /// If repeated, only the final flag will apply.
    pub fn config_file(mut self, flag: impl Into<String>) -> Self {
        self.config_flag.replace(flag.into());
        self
    }

    /// The name of this command.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("about", &self.about)
            .field("parameters", &self.parameters)
            .field("config_flag", &self.config_flag)
            .finish_non_exhaustive()
    }
}
