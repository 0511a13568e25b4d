use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches};
use terminal_size::{terminal_size, Width};

use crate::action::Action;
use crate::compiler::{CompiledCommand, Rule, Shape};
use crate::model::Value;

// Parameter names are identifiers, so they never reach this id.
const CONFIG_FILE_ID: &str = "\0config-file";

/// Runs a parameter's [`Action`] as clap's value parser, so that coercion errors surface as usage errors.
#[derive(Debug, Clone)]
pub(crate) struct ActionParser {
    name: String,
    action: Arc<dyn Action>,
    choices: Vec<String>,
}

impl ActionParser {
    fn new(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            action: rule.action.clone(),
            choices: rule.choices.clone(),
        }
    }
}

impl TypedValueParser for ActionParser {
    type Value = Value;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        _arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let text = value.to_str().ok_or_else(|| {
            clap::Error::raw(
                ErrorKind::InvalidUtf8,
                format!("argument {}: invalid UTF-8 value\n", self.name),
            )
            .with_cmd(cmd)
        })?;

        self.action
            .process(Value::from(text), &self.name)
            .map_err(|e| clap::Error::raw(ErrorKind::ValueValidation, format!("{e}\n")).with_cmd(cmd))
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        if self.choices.is_empty() {
            None
        } else {
            Some(Box::new(
                self.choices
                    .iter()
                    .map(|choice| PossibleValue::new(choice.clone())),
            ))
        }
    }
}

/// The clap command which matches the `command`'s rules, named `name`.
pub(crate) fn command_parser(command: &CompiledCommand, name: String) -> clap::Command {
    let mut parser = clap::Command::new(name).allow_negative_numbers(true);

    if let Some(about) = &command.about {
        parser = parser.about(about.clone());
    }

    for rule in &command.rules {
        parser = match rule.shape {
            Shape::Positional => parser.arg(
                Arg::new(rule.name.clone())
                    .required(true)
                    .value_name(rule.flag.to_ascii_uppercase())
                    .value_parser(ActionParser::new(rule))
                    .with_help(rule),
            ),
            Shape::Option => parser.arg(
                Arg::new(rule.name.clone())
                    .long(rule.flag.clone())
                    .action(ArgAction::Set)
                    .value_name(rule.flag.to_ascii_uppercase())
                    .value_parser(ActionParser::new(rule))
                    .with_help(rule),
            ),
            Shape::Toggle { required } => {
                let negated = rule.negated_flag();
                let parser = parser
                    .arg(
                        Arg::new(rule.name.clone())
                            .long(rule.flag.clone())
                            .action(ArgAction::SetTrue)
                            .overrides_with(negated.clone())
                            .with_help(rule),
                    )
                    .arg(
                        Arg::new(negated.clone())
                            .long(negated.clone())
                            .action(ArgAction::SetTrue)
                            .overrides_with(rule.name.clone()),
                    );

                if required {
                    parser.group(
                        ArgGroup::new(format!("<{}>", rule.name))
                            .args([rule.name.clone(), negated])
                            .required(true)
                            .multiple(true),
                    )
                } else {
                    parser
                }
            }
        };
    }

    if let Some(flag) = &command.config_flag {
        parser = parser.arg(
            Arg::new(CONFIG_FILE_ID)
                .long(flag.clone())
                .required(true)
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read the parameter values from this JSON (or .toml) file."),
        );
    }

    parser
}

trait WithHelp {
    fn with_help(self, rule: &Rule) -> Self;
}

impl WithHelp for Arg {
    fn with_help(self, rule: &Rule) -> Self {
        match &rule.help {
            Some(help) => self.help(help.clone()),
            None => self,
        }
    }
}

/// Size the help message to the terminal, when there is one.
pub(crate) fn fit_terminal(parser: clap::Command) -> clap::Command {
    match terminal_size() {
        Some((Width(width), _)) => parser.term_width(width as usize),
        None => parser,
    }
}

/// The values the user supplied on the command line, keyed by parameter name.
/// Parameters which were not supplied are absent.
pub(crate) fn supplied(command: &CompiledCommand, matches: &ArgMatches) -> HashMap<String, Value> {
    let mut values = HashMap::default();

    for rule in &command.rules {
        let value = match rule.shape {
            Shape::Toggle { .. } => {
                if from_command_line(matches, &rule.name) {
                    Some(Value::Bool(true))
                } else if from_command_line(matches, &rule.negated_flag()) {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
            Shape::Positional | Shape::Option => matches.get_one::<Value>(&rule.name).cloned(),
        };

        if let Some(value) = value {
            values.insert(rule.name.clone(), value);
        }
    }

    values
}

/// The config file the user supplied, if the `command` reads one.
pub(crate) fn config_file(command: &CompiledCommand, matches: &ArgMatches) -> Option<PathBuf> {
    command
        .config_flag
        .as_ref()
        .and_then(|_| matches.get_one::<PathBuf>(CONFIG_FILE_ID).cloned())
}

fn from_command_line(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.value_source(id), Some(ValueSource::CommandLine))
}
