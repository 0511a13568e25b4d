use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::action::{invalid, Action};
use crate::error::ValidationError;
use crate::model::Value;

/// The validation applied to a path parameter.
///
/// Checks run in a fixed order: existence, file-not-allowed, directory-not-allowed, readability, writability.
/// The default checks nothing: any path is accepted as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChecks {
    pub(crate) exists: bool,
    pub(crate) file_okay: bool,
    pub(crate) dir_okay: bool,
    pub(crate) readable: bool,
    pub(crate) writable: bool,
    pub(crate) resolve_path: bool,
}

impl Default for PathChecks {
    fn default() -> Self {
        Self {
            exists: false,
            file_okay: true,
            dir_okay: true,
            readable: false,
            writable: false,
            resolve_path: false,
        }
    }
}

/// Parses paths into [`Value::Path`], validating them against [`PathChecks`].
#[derive(Debug, Clone, Default)]
pub struct PathAction {
    checks: PathChecks,
}

impl PathAction {
    /// Create a path action which applies the `checks`.
    pub fn new(checks: PathChecks) -> Self {
        Self { checks }
    }
}

impl Action for PathAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        // Typed paths are checked again; the filesystem may have changed since they were built.
        let path = match &raw {
            Value::Path(path) => path.clone(),
            Value::Str(text) => PathBuf::from(text),
            _ => {
                return Err(invalid(
                    destination,
                    &raw,
                    format!("invalid path value: '{raw}'"),
                ))
            }
        };
        let path = if self.checks.resolve_path {
            resolve(&path).map_err(|e| {
                invalid(
                    destination,
                    &raw,
                    format!("Path {} cannot be resolved: {e}.", path.display()),
                )
            })?
        } else {
            path
        };
        let checks = &self.checks;
        let shown = path.display();

        if checks.exists && !path.exists() {
            return Err(invalid(
                destination,
                &raw,
                format!("Path {shown} does not exist."),
            ));
        }

        if !checks.file_okay && path.is_file() {
            return Err(invalid(
                destination,
                &raw,
                format!("File {shown} is a file."),
            ));
        }

        if !checks.dir_okay && path.is_dir() {
            return Err(invalid(
                destination,
                &raw,
                format!("File {shown} is a directory."),
            ));
        }

        if checks.readable && !is_readable(&path) {
            return Err(invalid(
                destination,
                &raw,
                format!("Path {shown} is not readable."),
            ));
        }

        if checks.writable && !is_writable(&path) {
            return Err(invalid(
                destination,
                &raw,
                format!("Path {shown} is not writable."),
            ));
        }

        Ok(Value::Path(path))
    }
}

fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        // Paths that do not exist (yet) still resolve against the working directory.
        Err(_) => std::path::absolute(path),
    }
}

fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        File::open(path).is_ok()
    }
}

fn is_writable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => !metadata.permissions().readonly(),
        // Opening for append neither creates nor truncates the file.
        Ok(_) => OpenOptions::new().append(true).open(path).is_ok(),
        Err(_) => false,
    }
}
