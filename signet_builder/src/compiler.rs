//! Compiles the declared parameters of a [`Command`] into parser rules.
use std::collections::HashSet;
use std::sync::Arc;

use crate::action::{Action, ActionRegistry, BooleanAction, EnumAction};
use crate::api::{Command, Handler, ParameterDescriptor};
use crate::environment::Environment;
use crate::error::{ConfigurationError, Error};
use crate::model::{DeclaredType, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) const HELP: &str = "help";

/// How a rule is matched on the Cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// A mandatory positional argument.
    Positional,
    /// An optional `--flag value`.
    Option,
    /// A `--flag` / `--no-flag` pair.
    Toggle { required: bool },
}

/// The parser rule and coercion of one parameter.
#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pub(crate) name: String,
    pub(crate) flag: String,
    pub(crate) shape: Shape,
    pub(crate) action: Arc<dyn Action>,
    pub(crate) default: Option<Value>,
    pub(crate) help: Option<String>,
    pub(crate) choices: Vec<String>,
}

impl Rule {
    /// The flag which sets a toggle to false.
    pub(crate) fn negated_flag(&self) -> String {
        format!("no-{}", self.flag)
    }
}

/// A command ready for dispatch.
pub(crate) struct CompiledCommand {
    pub(crate) name: String,
    pub(crate) about: Option<String>,
    pub(crate) rules: Vec<Rule>,
    pub(crate) config_flag: Option<String>,
    pub(crate) handler: Handler,
}

impl CompiledCommand {
    pub(crate) fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

impl std::fmt::Debug for CompiledCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledCommand")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field("config_flag", &self.config_flag)
            .finish_non_exhaustive()
    }
}

pub(crate) fn compile(
    command: Command,
    registry: &ActionRegistry,
    environment: &dyn Environment,
) -> Result<CompiledCommand, Error> {
    let Command {
        name,
        about,
        parameters,
        config_flag,
        handler,
    } = command;
    let mut seen = HashSet::new();
    let mut rules = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        if !is_identifier(&parameter.name) {
            return Err(ConfigurationError::InvalidName {
                name: parameter.name,
            }
            .into());
        }

        if parameter.name == HELP {
            return Err(ConfigurationError::ReservedName {
                name: parameter.name,
            }
            .into());
        }

        if !seen.insert(parameter.name.clone()) {
            return Err(ConfigurationError::DuplicateParameter {
                command: name,
                name: parameter.name,
            }
            .into());
        }

        let rule = compile_parameter(parameter, registry, environment, config_flag.as_deref())?;
        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Command '{name}' compiled {rule:?}.",
                rule = (&rule.flag, rule.shape, &rule.default)
            );
        }
        rules.push(rule);
    }

    // Every flag on the Cli must be distinct, including the negated toggles and the config file flag.
    let mut flags = HashSet::new();
    let mut candidates: Vec<String> = Vec::default();

    for rule in &rules {
        candidates.push(rule.flag.clone());

        if matches!(rule.shape, Shape::Toggle { .. }) {
            candidates.push(rule.negated_flag());
        }
    }

    candidates.extend(config_flag.iter().cloned());

    for flag in candidates {
        if flag == HELP || !flags.insert(flag.clone()) {
            return Err(ConfigurationError::DuplicateParameter {
                command: name,
                name: flag,
            }
            .into());
        }
    }

    Ok(CompiledCommand {
        name,
        about,
        rules,
        config_flag,
        handler,
    })
}

fn compile_parameter(
    parameter: ParameterDescriptor,
    registry: &ActionRegistry,
    environment: &dyn Environment,
    config_flag: Option<&str>,
) -> Result<Rule, Error> {
    let ParameterDescriptor {
        name,
        declared,
        default,
        argument,
    } = parameter;
    let argument = argument.unwrap_or_default();

    let declared = match declared {
        DeclaredType::Optional(inner) => {
            if default.is_none() {
                return Err(ConfigurationError::OptionalWithoutDefault {
                    name,
                    declared: DeclaredType::Optional(inner).to_string(),
                }
                .into());
            }

            *inner
        }
        declared => declared,
    };

    let mut choices = Vec::default();
    let action: Arc<dyn Action> = match &declared {
        DeclaredType::Boolean => Arc::new(BooleanAction),
        DeclaredType::Enumeration(spec) => {
            if spec.values().is_empty() {
                return Err(ConfigurationError::EmptyEnumeration {
                    name,
                    type_name: spec.type_name,
                }
                .into());
            }

            choices = spec.values().to_vec();
            Arc::new(EnumAction::new(spec.clone()))
        }
        DeclaredType::Named(key) => match registry.get(key) {
            Some(factory) => factory.create(&name, &argument)?,
            None => {
                return Err(ConfigurationError::UnsupportedType {
                    name,
                    declared: declared.to_string(),
                }
                .into());
            }
        },
        DeclaredType::Optional(_) => {
            return Err(ConfigurationError::UnsupportedType {
                name,
                declared: DeclaredType::Optional(Box::new(declared.clone())).to_string(),
            }
            .into());
        }
    };

    let default = match default {
        None => None,
        Some(Value::None) => Some(Value::None),
        Some(literal) => Some(action.process(literal, &name).map_err(|source| {
            ConfigurationError::InvalidDefault {
                name: name.clone(),
                source,
            }
        })?),
    };

    let default = match (argument.envvar_name(), default) {
        (Some(envvar), None) => {
            return Err(ConfigurationError::EnvvarWithoutDefault {
                name,
                envvar: envvar.to_string(),
            }
            .into());
        }
        (Some(envvar), Some(literal)) => match environment.var(envvar) {
            Some(text) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parameter '{name}' takes its default from the environment variable '{envvar}'.");
                }

                Some(action.process(Value::Str(text), &name)?)
            }
            None => Some(literal),
        },
        (None, default) => default,
    };

    let shape = match (&declared, &default, config_flag) {
        (DeclaredType::Boolean, None, Some(config_flag)) => {
            return Err(ConfigurationError::BooleanWithoutDefault {
                name,
                config_flag: config_flag.to_string(),
            }
            .into());
        }
        (DeclaredType::Boolean, default, _) => Shape::Toggle {
            required: default.is_none(),
        },
        (_, None, None) => Shape::Positional,
        _ => Shape::Option,
    };

    let help = match (argument.help_text(), &default) {
        (Some(help), None) => Some(help.to_string()),
        (Some(help), Some(default)) => Some(format!("{help} [default: {default}]")),
        (None, Some(default)) => Some(format!("- [default: {default}]")),
        (None, None) => None,
    };

    Ok(Rule {
        flag: name.replace('_', "-"),
        name,
        shape,
        action,
        default,
        help,
        choices,
    })
}

fn is_identifier(name: &str) -> bool {
    let mut characters = name.chars();

    match characters.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            characters.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
