//! Merges the command line, config file, and compiled defaults into the final [`Arguments`].
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::api::Arguments;
use crate::compiler::CompiledCommand;
use crate::error::{Error, MissingConfigValue, ValidationError};
use crate::model::Value;

mod config;

use config::Entry;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Resolve the value of every parameter of the `command`.
///
/// Precedence, highest first: the `supplied` command line values, the config file, the compiled default.
/// Parameters left without a value are reported together.
pub(crate) fn reconcile(
    command: &CompiledCommand,
    mut supplied: HashMap<String, Value>,
    config_file: Option<&Path>,
) -> Result<Arguments, Error> {
    let mut document = match config_file {
        Some(path) => {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Command '{}' reads the config file '{}'.", command.name, path.display());
            }

            config::load(path)?
        }
        None => BTreeMap::default(),
    };
    let mut arguments = Arguments::default();
    let mut missing = Vec::default();

    for rule in &command.rules {
        let value = match supplied.remove(&rule.name) {
            Some(value) => Some(value),
            None => match document.remove(&rule.name) {
                Some(Entry::Scalar(Value::None)) => Some(Value::None),
                Some(Entry::Scalar(raw)) => Some(rule.action.process(raw, &rule.name)?),
                Some(Entry::Nested(text)) => {
                    return Err(ValidationError::new(
                        &rule.name,
                        text.as_str(),
                        format!("nested config values are not supported: '{text}'"),
                    )
                    .into());
                }
                None => rule.default.clone(),
            },
        };

        match value {
            Some(value) => arguments.insert(rule.name.clone(), value),
            None => missing.push(rule.name.clone()),
        }
    }

    #[cfg(feature = "tracing_debug")]
    {
        for key in document.keys() {
            debug!("Config key '{key}' is not a parameter of '{}'; ignoring.", command.name);
        }
    }

    if missing.is_empty() {
        Ok(arguments)
    } else {
        Err(MissingConfigValue::new(missing).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionRegistry;
    use crate::api::{Command, Outcome, Parameter};
    use crate::compiler::compile;
    use crate::environment::MemoryEnvironment;
    use crate::test::assert_contains;
    use std::io::Write;

    fn compiled(command: Command) -> CompiledCommand {
        compile(
            command,
            &ActionRegistry::default(),
            &MemoryEnvironment::default(),
        )
        .unwrap()
    }

    fn command() -> Command {
        Command::new("cmd", |_: Arguments| Outcome::Completed)
            .parameter(Parameter::<i64>::new("n"))
            .parameter(Parameter::<String>::new("name"))
            .parameter(Parameter::<bool>::new("verbose").default(false))
            .config_file("config-file")
    }

    fn config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn supplied(values: Vec<(&str, Value)>) -> HashMap<String, Value> {
        values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn command_line_and_defaults() {
        let command = compiled(
            Command::new("cmd", |_: Arguments| Outcome::Completed)
                .parameter(Parameter::<i64>::new("n"))
                .parameter(Parameter::<String>::new("name").default("World")),
        );

        let arguments = reconcile(&command, supplied(vec![("n", Value::Int(3))]), None).unwrap();
        assert_eq!(arguments.get::<i64>("n").unwrap(), 3);
        assert_eq!(arguments.get::<String>("name").unwrap(), "World");

        let arguments = reconcile(
            &command,
            supplied(vec![("n", Value::Int(3)), ("name", Value::from("Alice"))]),
            None,
        )
        .unwrap();
        assert_eq!(arguments.get::<String>("name").unwrap(), "Alice");
    }

    #[test]
    fn command_line_overrides_config() {
        let command = compiled(command());
        let file = config(r#"{"n": 3, "name": "qwerty"}"#);

        let arguments = reconcile(
            &command,
            supplied(vec![("name", Value::from("asdf"))]),
            Some(file.path()),
        )
        .unwrap();

        assert_eq!(arguments.get::<i64>("n").unwrap(), 3);
        assert_eq!(arguments.get::<String>("name").unwrap(), "asdf");
        assert!(!arguments.get::<bool>("verbose").unwrap());
    }

    #[test]
    fn config_values_are_coerced() {
        let command = compiled(command());
        let file = config(r#"{"n": "7", "name": 12, "verbose": "true", "unknown": [1]}"#);

        let arguments = reconcile(&command, HashMap::default(), Some(file.path())).unwrap();

        assert_eq!(arguments.get::<i64>("n").unwrap(), 7);
        assert_eq!(arguments.get::<String>("name").unwrap(), "12");
        assert!(arguments.get::<bool>("verbose").unwrap());
    }

    #[test]
    fn config_value_invalid() {
        let command = compiled(command());
        let file = config(r#"{"n": "three", "name": "qwerty"}"#);

        let error = reconcile(&command, HashMap::default(), Some(file.path())).unwrap_err();
        assert_matches!(error, Error::Validation(ref e) if e.destination() == "n");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn config_value_nested() {
        let command = compiled(command());
        let file = config(r#"{"n": {"value": 3}, "name": "qwerty"}"#);

        let error = reconcile(&command, HashMap::default(), Some(file.path())).unwrap_err();
        assert_matches!(error, Error::Validation(_));
        assert_contains!(error.to_string(), "nested config values");
    }

    #[test]
    fn missing_config_values() {
        let command = compiled(command());
        let file = config(r#"{"verbose": true}"#);

        let error = reconcile(&command, HashMap::default(), Some(file.path())).unwrap_err();
        match error {
            Error::MissingConfigValue(missing) => {
                assert_eq!(missing.missing(), &["n".to_string(), "name".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let error = reconcile(
            &command,
            supplied(vec![("n", Value::Int(1))]),
            Some(file.path()),
        )
        .unwrap_err();
        assert_contains!(
            error.to_string(),
            "the following mandatory config params have not been passed: name"
        );
    }

    #[test]
    fn config_null() {
        let command = compiled(
            Command::new("cmd", |_: Arguments| Outcome::Completed)
                .parameter(Parameter::<Option<i64>>::new("limit").default(Some(5)))
                .config_file("config-file"),
        );
        let file = config(r#"{"limit": null}"#);

        let arguments = reconcile(&command, HashMap::default(), Some(file.path())).unwrap();
        assert_eq!(arguments.get::<Option<i64>>("limit").unwrap(), None);
    }

    #[test]
    fn config_unreadable() {
        let command = compiled(command());
        let directory = tempfile::tempdir().unwrap();

        let error = reconcile(
            &command,
            HashMap::default(),
            Some(&directory.path().join("absent.json")),
        )
        .unwrap_err();
        assert_matches!(error, Error::ConfigFile(_));
        assert_eq!(error.exit_code(), 2);
    }
}
