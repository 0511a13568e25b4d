use std::collections::HashSet;

use crate::action::{ActionFactory, ActionRegistry};
use crate::api::Command;
use crate::compiler::{compile, CompiledCommand, HELP};
use crate::environment::{Environment, ProcessEnvironment};
use crate::error::{ConfigurationError, Error};
use crate::parser::{Cli, ConsoleInterface, Root, UserInterface};

/// The command line application: a set of commands, and the types they may declare.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{Application, Arguments, Command, Exit, Parameter};
///
/// let cli = Application::new("program")
///     .about("My program that does awesome stuff.")
///     .command(
///         Command::new("add", |arguments: Arguments| -> signet::anyhow::Result<()> {
///             let a: i64 = arguments.get("a")?;
///             let b: i64 = arguments.get("b")?;
///             println!("{}", a + b);
///             Ok(())
///         })
///         .parameter(Parameter::<i64>::new("a"))
///         .parameter(Parameter::<i64>::new("b")),
///     )
///     .build_cli()
///     .unwrap();
///
/// assert_eq!(cli.invoke(&["add", "1", "2"]).unwrap(), Exit::Completed);
/// ```
pub struct Application {
    program: String,
    about: Option<String>,
    commands: Vec<Command>,
    standalone: bool,
    registry: ActionRegistry,
    environment: Box<dyn Environment>,
}

impl Application {
    /// Create an application whose commands are sub-commands of the `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            commands: Vec::default(),
            standalone: false,
            registry: ActionRegistry::default(),
            environment: Box::new(ProcessEnvironment),
        }
    }

    /// Create an application which is the single `command`.
    /// The command's name is used as the program name.
    ///
    /// ### Example
    /// ```
    /// # use signet_builder as signet;
    /// use signet::{Application, Arguments, Command, Exit, Parameter};
    ///
    /// let cli = Application::single(
    ///     Command::new("greet", |arguments: Arguments| -> signet::anyhow::Result<()> {
    ///         let name: String = arguments.get("name")?;
    ///         println!("Hello {name}!");
    ///         Ok(())
    ///     })
    ///     .parameter(Parameter::<String>::new("name").default("World")),
    /// )
    /// .build_cli()
    /// .unwrap();
    ///
    /// assert_eq!(cli.invoke(&["--name", "Alice"]).unwrap(), Exit::Completed);
    /// ```
    pub fn single(command: Command) -> Self {
        let mut application = Self::new(command.name.clone());
        application.commands.push(command);
        application.standalone = true;
        application
    }

    /// Document the about message for this application.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add a command, exposed as the sub-command of its own name.
    ///
    /// Adding a command to an application created with [`Application::single`] turns both into sub-commands.
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self.standalone = false;
        self
    }

    /// Register the action `factory` for the type `key`.
    ///
    /// Parameters whose [`Declared`](crate::Declared) type is [`DeclaredType::Named`](crate::DeclaredType::Named)
    /// with this `key` are coerced by the created actions.
    /// If repeated for the same `key`, only the final factory will apply.
    pub fn register(mut self, key: &'static str, factory: impl ActionFactory + 'static) -> Self {
        self.registry.register(key, factory);
        self
    }

    /// Read the parameters' environment variables from `environment`, rather than the process environment.
    pub fn environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    fn build_with_interface(self, user_interface: Box<dyn UserInterface>) -> Result<Cli, Error> {
        let Application {
            program,
            about,
            commands,
            standalone,
            registry,
            environment,
        } = self;
        let mut names = HashSet::new();
        let mut compiled: Vec<CompiledCommand> = Vec::with_capacity(commands.len());

        for command in commands {
            if (!standalone && command.name == HELP) || !names.insert(command.name.clone()) {
                return Err(ConfigurationError::DuplicateCommand { name: command.name }.into());
            }

            compiled.push(compile(command, &registry, environment.as_ref())?);
        }

        let root = if standalone {
            match compiled.pop() {
                Some(command) => Root::Single(command),
                None => unreachable!("internal error - a single application must have its command."),
            }
        } else {
            Root::Commands(compiled)
        };

        Ok(Cli::new(program, about, root, user_interface))
    }

    /// Build the Cli as a Result.
    /// This finalizes the configuration and checks for errors (ex: a parameter without a default is `Option<T>`).
    pub fn build_cli(self) -> Result<Cli, Error> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the Cli.
    /// This finalizes the configuration and checks for errors (ex: a parameter without a default is `Option<T>`).
    /// If an error is encountered, exits with error code `1` for declaration errors, or `2` for invalid values read
    /// from the environment (via [`std::process::exit`]).
    pub fn build(self) -> Cli {
        match self.build_cli() {
            Ok(cli) => cli,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(e.exit_code());
            }
        }
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("program", &self.program)
            .field("commands", &self.commands)
            .field("standalone", &self.standalone)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Cli {
    /// Build the Cli for the single `command`, with the built-in types and the process environment.
    pub fn single(command: Command) -> Result<Cli, Error> {
        Application::single(command).build_cli()
    }
}

/// Build the Cli for the single `command` and run it against the [`env::args`](std::env::args).
///
/// See [`Application::build`] and [`Cli::run`] for how errors are handled.
pub fn run(command: Command) -> anyhow::Result<()> {
    Application::single(command).build().run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, IntAction};
    use crate::api::{Argument, Arguments, Declared, Outcome, Parameter};
    use crate::environment::MemoryEnvironment;
    use crate::model::{DeclaredType, Value};
    use crate::parser::util::InMemoryInterface;
    use crate::parser::Exit;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn noop(name: &str) -> Command {
        Command::new(name, |_: Arguments| Outcome::Completed)
    }

    fn build(application: Application) -> Result<Cli, Error> {
        application.build_with_interface(Box::new(InMemoryInterface::default()))
    }

    #[test]
    fn duplicate_command() {
        let result = build(
            Application::new("program")
                .command(noop("a"))
                .command(noop("a")),
        );
        assert_matches!(
            result,
            Err(Error::Configuration(ConfigurationError::DuplicateCommand { name })) if name == "a"
        );
    }

    #[test]
    fn help_command() {
        let result = build(Application::new("program").command(noop("help")));
        assert_matches!(
            result,
            Err(Error::Configuration(ConfigurationError::DuplicateCommand { .. }))
        );

        // A single command is not a sub-command.
        build(Application::single(noop("help"))).unwrap();
    }

    #[test]
    fn configuration_error() {
        let result = build(Application::single(
            noop("cmd").parameter(Parameter::<Option<i64>>::new("limit")),
        ));
        match result {
            Err(error) => {
                assert_eq!(error.exit_code(), 1);
                assert_matches!(
                    error,
                    Error::Configuration(ConfigurationError::OptionalWithoutDefault { .. })
                );
            }
            Ok(_) => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn single_to_commands() {
        let cli = build(Application::single(noop("a")).command(noop("b"))).unwrap();
        assert_eq!(cli.invoke(&["a"]).unwrap(), Exit::Completed);
        assert_eq!(cli.invoke(&["b"]).unwrap(), Exit::Completed);
    }

    #[test]
    fn environment() {
        let seen = Rc::new(RefCell::new(None));
        let captured = seen.clone();
        let command = Command::new("cmd", move |arguments: Arguments| -> anyhow::Result<()> {
            captured.replace(Some(arguments.get::<i64>("age")?));
            Ok(())
        })
        .parameter(
            Parameter::<i64>::new("age")
                .default(14)
                .argument(Argument::new().envvar("AGE")),
        );

        let cli = build(
            Application::single(command).environment(MemoryEnvironment::default().with("AGE", "21")),
        )
        .unwrap();
        assert_eq!(cli.invoke(&[]).unwrap(), Exit::Completed);
        assert_eq!(*seen.borrow(), Some(21));
    }

    #[test]
    fn config_file_named_like_parameter() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("config.json");
        std::fs::write(&path, r#"{"n": 3}"#).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let captured = seen.clone();
        let command = Command::new("cmd", move |arguments: Arguments| -> anyhow::Result<()> {
            captured.replace(Some((
                arguments.get::<i64>("n")?,
                arguments.get::<String>("config_file")?,
            )));
            Ok(())
        })
        .parameter(Parameter::<i64>::new("n"))
        .parameter(Parameter::<String>::new("config_file").default("x"))
        .config_file("config_file");

        let cli = build(Application::single(command)).unwrap();
        let path = path.to_str().unwrap();
        assert_eq!(cli.invoke(&["--config_file", path]).unwrap(), Exit::Completed);
        assert_eq!(*seen.borrow(), Some((3, "x".to_string())));
    }

    #[test]
    fn environment_unparsable() {
        let command = noop("cmd").parameter(
            Parameter::<i64>::new("age")
                .default(14)
                .argument(Argument::new().envvar("AGE")),
        );

        let result = build(
            Application::single(command).environment(MemoryEnvironment::default().with("AGE", "old")),
        );
        match result {
            Err(error) => {
                assert_eq!(error.exit_code(), 2);
                assert_matches!(error, Error::Validation(_));
            }
            Ok(_) => panic!("expected a validation error"),
        }
    }

    #[test]
    fn register() {
        #[derive(Debug, PartialEq)]
        struct Port(i64);

        impl Declared for Port {
            fn declared_type() -> DeclaredType {
                DeclaredType::Named("port")
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Int(port) => Some(Port(port)),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::Int(self.0)
            }
        }

        #[derive(Debug)]
        struct PortAction;

        impl Action for PortAction {
            fn process(&self, raw: Value, destination: &str) -> Result<Value, crate::ValidationError> {
                match IntAction.process(raw.clone(), destination)? {
                    Value::Int(port) if (1..=65535).contains(&port) => Ok(Value::Int(port)),
                    _ => Err(crate::ValidationError::new(
                        destination,
                        raw.to_string(),
                        "port out of range",
                    )),
                }
            }
        }

        let seen = Rc::new(RefCell::new(None));
        let captured = seen.clone();
        let command = Command::new("serve", move |arguments: Arguments| -> anyhow::Result<()> {
            captured.replace(Some(arguments.get::<Port>("port")?));
            Ok(())
        })
        .parameter(Parameter::<Port>::new("port"));

        let result = build(Application::single(noop("serve").parameter(Parameter::<Port>::new("port"))));
        assert_matches!(
            result,
            Err(Error::Configuration(ConfigurationError::UnsupportedType { .. }))
        );

        let cli = build(Application::single(command).register(
            "port",
            |_: &str, _: &Argument| -> Result<Arc<dyn Action>, ConfigurationError> {
                Ok(Arc::new(PortAction))
            },
        ))
        .unwrap();

        assert_eq!(cli.invoke(&["8080"]).unwrap(), Exit::Completed);
        assert_eq!(cli.invoke(&["70000"]).unwrap(), Exit::Failed(2));
        assert_eq!(*seen.borrow(), Some(Port(8080)));
    }
}
