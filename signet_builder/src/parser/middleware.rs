use std::env;

use clap::error::ErrorKind;

use crate::api::{Arguments, Outcome};
use crate::compiler::CompiledCommand;
use crate::parser::bridge;
use crate::parser::interface::UserInterface;
use crate::reconcile::reconcile;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// How an invocation of the [`Cli`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The handler ran to completion.
    Completed,
    /// The handler returned [`Outcome::Exit`].
    EarlyExit,
    /// The help message was displayed.
    Help,
    /// The input was rejected; holds the exit code.
    Failed(i32),
}

impl Exit {
    /// The process exit code which represents this ending.
    pub fn code(&self) -> i32 {
        match self {
            Exit::Completed | Exit::EarlyExit | Exit::Help => 0,
            Exit::Failed(code) => *code,
        }
    }
}

pub(crate) enum Root {
    /// The command is the program itself.
    Single(CompiledCommand),
    /// Each command is a sub-command of the program.
    Commands(Vec<CompiledCommand>),
}

/// The configured command line interface.
/// Built via [`Application::build`](crate::Application::build), [`Cli::single`], or [`run`](crate::run).
pub struct Cli {
    program: String,
    about: Option<String>,
    root: Root,
    user_interface: Box<dyn UserInterface>,
}

impl Cli {
    pub(crate) fn new(
        program: String,
        about: Option<String>,
        root: Root,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program,
            about,
            root,
            user_interface,
        }
    }

    fn parser(&self) -> clap::Command {
        let parser = match &self.root {
            Root::Single(command) => {
                let parser = bridge::command_parser(command, self.program.clone());

                match &self.about {
                    Some(about) => parser.about(about.clone()),
                    None => parser,
                }
            }
            Root::Commands(commands) => {
                let mut parser = clap::Command::new(self.program.clone())
                    .subcommand_required(true)
                    .arg_required_else_help(true);

                if let Some(about) = &self.about {
                    parser = parser.about(about.clone());
                }

                parser.subcommands(
                    commands
                        .iter()
                        .map(|command| bridge::command_parser(command, command.name.clone())),
                )
            }
        };

        bridge::fit_terminal(parser)
    }

    /// Run the Cli against the input tokens (excluding the program name).
    ///
    /// Dispatch happens in three phases:
    /// 1. Parsing matches the tokens to the commands' parameters, coercing each value by its declared type.
    /// 2. Reconciling fills the parameters which were not supplied, from the config file and the declared defaults.
    /// 3. Invoking calls the selected command's handler with the resolved [`Arguments`].
    ///
    /// If the input is rejected in phases 1 or 2, the error and the help message are displayed, and the result is
    /// [`Exit::Failed`] with exit code `2`.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the help message is displayed and the result is
    /// [`Exit::Help`].
    ///
    /// Errors returned by the handler are propagated as-is.
    pub fn invoke(&self, tokens: &[&str]) -> anyhow::Result<Exit> {
        let mut parser = self.parser();
        let matches = match parser
            .try_get_matches_from_mut(std::iter::once(self.program.as_str()).chain(tokens.iter().copied()))
        {
            Ok(matches) => matches,
            Err(error) => return Ok(self.reject(&mut parser, tokens, error)),
        };

        let (command, matches) = match &self.root {
            Root::Single(command) => (command, &matches),
            Root::Commands(commands) => {
                match matches.subcommand().and_then(|(name, sub_matches)| {
                    commands
                        .iter()
                        .find(|command| command.name == name)
                        .map(|command| (command, sub_matches))
                }) {
                    Some(selected) => selected,
                    None => unreachable!("internal error - a sub-command must be selected."),
                }
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsed tokens {tokens:?} for command '{}'.", command.name);
        }

        let supplied = bridge::supplied(command, matches);
        let config_file = bridge::config_file(command, matches);
        let arguments = match reconcile(command, supplied, config_file.as_deref()) {
            Ok(arguments) => arguments,
            Err(error) => {
                self.user_interface.print_error(format!("error: {error}"));
                let help = match &self.root {
                    Root::Single(_) => parser.render_help(),
                    Root::Commands(_) => match parser.find_subcommand_mut(&command.name) {
                        Some(sub_command) => sub_command.render_help(),
                        None => parser.render_help(),
                    },
                };
                self.user_interface.print(help.to_string());
                return Ok(Exit::Failed(error.exit_code()));
            }
        };

        self.dispatch(command, arguments)
    }

    fn reject(&self, parser: &mut clap::Command, tokens: &[&str], error: clap::Error) -> Exit {
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                self.user_interface.print(error.to_string());
                Exit::Help
            }
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                self.user_interface.print(error.to_string());
                Exit::Failed(error.exit_code())
            }
            _ => {
                self.user_interface.print_error(error.to_string());
                let help = match self.selected(parser, tokens) {
                    Some(sub_command) => sub_command.render_help(),
                    None => parser.render_help(),
                };
                self.user_interface.print(help.to_string());
                Exit::Failed(error.exit_code())
            }
        }
    }

    /// The sub-command named in the `tokens`, if any.
    fn selected<'p>(&self, parser: &'p mut clap::Command, tokens: &[&str]) -> Option<&'p mut clap::Command> {
        match &self.root {
            Root::Single(_) => None,
            Root::Commands(commands) => {
                let name = tokens
                    .iter()
                    .find(|token| commands.iter().any(|command| command.name == **token))?;
                parser.find_subcommand_mut(name)
            }
        }
    }

    fn dispatch(&self, command: &CompiledCommand, arguments: Arguments) -> anyhow::Result<Exit> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Invoking '{}' with {arguments:?}.", command.name);
        }

        match (command.handler)(arguments)? {
            Outcome::Completed => Ok(Exit::Completed),
            Outcome::Exit => Ok(Exit::EarlyExit),
        }
    }

    /// Run the Cli against the [`env::args`].
    ///
    /// See [`Cli::invoke`] for the dispatch phases.
    /// If the input is rejected, exits with error code `2` (via [`std::process::exit`]).
    /// If the help message is displayed, exits with code `0`.
    ///
    /// Errors returned by the handler are propagated as-is.
    pub fn run(self) -> anyhow::Result<()> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let exit = self.invoke(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )?;

        match exit {
            Exit::Completed | Exit::EarlyExit => Ok(()),
            exit => std::process::exit(exit.code()),
        }
    }
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let commands: Vec<&str> = match &self.root {
            Root::Single(command) => vec![command.name.as_str()],
            Root::Commands(commands) => commands.iter().map(|c| c.name.as_str()).collect(),
        };
        f.debug_struct("Cli")
            .field("program", &self.program)
            .field("commands", &commands)
            .finish_non_exhaustive()
    }
}
