use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigFileError;
use crate::model::Value;

/// One entry of a config document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Entry {
    Scalar(Value),
    /// An array or table, rendered as text for error messages.
    Nested(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension() {
            Some(extension) if extension.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// Read the flat key/value document at `path`.
/// The file is read in full and closed before returning.
pub(crate) fn load(path: &Path) -> Result<BTreeMap<String, Entry>, ConfigFileError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match Format::of(path) {
        Format::Json => from_json(path, &text),
        Format::Toml => from_toml(path, &text),
    }
}

fn from_json(path: &Path, text: &str) -> Result<BTreeMap<String, Entry>, ConfigFileError> {
    let document: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ConfigFileError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match document {
        serde_json::Value::Object(table) => Ok(table
            .into_iter()
            .map(|(key, value)| (key, json_entry(value)))
            .collect()),
        _ => Err(ConfigFileError::NotATable {
            path: path.to_path_buf(),
        }),
    }
}

fn json_entry(value: serde_json::Value) -> Entry {
    match value {
        serde_json::Value::Null => Entry::Scalar(Value::None),
        serde_json::Value::Bool(value) => Entry::Scalar(Value::Bool(value)),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(value) => Entry::Scalar(Value::Int(value)),
            None => match number.as_f64() {
                Some(value) => Entry::Scalar(Value::Float(value)),
                None => Entry::Scalar(Value::Str(number.to_string())),
            },
        },
        serde_json::Value::String(value) => Entry::Scalar(Value::Str(value)),
        nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
            Entry::Nested(nested.to_string())
        }
    }
}

fn from_toml(path: &Path, text: &str) -> Result<BTreeMap<String, Entry>, ConfigFileError> {
    let table: toml::Table = text.parse().map_err(|e: toml::de::Error| {
        ConfigFileError::Malformed {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        }
    })?;

    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_entry(value)))
        .collect())
}

fn toml_entry(value: toml::Value) -> Entry {
    match value {
        toml::Value::String(value) => Entry::Scalar(Value::Str(value)),
        toml::Value::Integer(value) => Entry::Scalar(Value::Int(value)),
        toml::Value::Float(value) => Entry::Scalar(Value::Float(value)),
        toml::Value::Boolean(value) => Entry::Scalar(Value::Bool(value)),
        toml::Value::Datetime(value) => Entry::Scalar(Value::Str(value.to_string())),
        nested @ (toml::Value::Array(_) | toml::Value::Table(_)) => {
            Entry::Nested(nested.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn json() {
        let file = write(
            ".json",
            r#"{"n": 3, "ratio": 0.5, "name": "qwerty", "verbose": true, "output": null, "list": [1, 2]}"#,
        );
        let document = load(file.path()).unwrap();

        assert_eq!(document["n"], Entry::Scalar(Value::Int(3)));
        assert_eq!(document["ratio"], Entry::Scalar(Value::Float(0.5)));
        assert_eq!(document["name"], Entry::Scalar(Value::from("qwerty")));
        assert_eq!(document["verbose"], Entry::Scalar(Value::Bool(true)));
        assert_eq!(document["output"], Entry::Scalar(Value::None));
        assert_eq!(document["list"], Entry::Nested("[1,2]".to_string()));
    }

    #[test]
    fn toml() {
        let file = write(
            ".toml",
            "n = 3\nname = \"qwerty\"\nverbose = false\nbirthday = 1956-01-31\n",
        );
        let document = load(file.path()).unwrap();

        assert_eq!(document["n"], Entry::Scalar(Value::Int(3)));
        assert_eq!(document["name"], Entry::Scalar(Value::from("qwerty")));
        assert_eq!(document["verbose"], Entry::Scalar(Value::Bool(false)));
        assert_eq!(document["birthday"], Entry::Scalar(Value::from("1956-01-31")));
    }

    #[test]
    fn unknown_extension_is_json() {
        let file = write(".conf", r#"{"n": 3}"#);
        assert_eq!(
            load(file.path()).unwrap()["n"],
            Entry::Scalar(Value::Int(3))
        );
    }

    #[test]
    fn malformed() {
        let file = write(".json", "{\"n\": ");
        assert_matches!(load(file.path()), Err(ConfigFileError::Malformed { .. }));

        let file = write(".toml", "n = ");
        assert_matches!(load(file.path()), Err(ConfigFileError::Malformed { .. }));
    }

    #[test]
    fn not_a_table() {
        let file = write(".json", "[1, 2, 3]");
        assert_matches!(load(file.path()), Err(ConfigFileError::NotATable { .. }));
    }

    #[test]
    fn unreadable() {
        let directory = tempfile::tempdir().unwrap();
        assert_matches!(
            load(&directory.path().join("absent.json")),
            Err(ConfigFileError::Unreadable { .. })
        );
    }
}
