use std::collections::HashMap;

/// The source of environment variables, read while compiling commands.
pub trait Environment {
    /// The value of the variable `name`, if it is set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of environment variables.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{Environment, MemoryEnvironment};
///
/// let environment = MemoryEnvironment::default().with("USER_NAME", "Alice");
/// assert_eq!(environment.var("USER_NAME"), Some("Alice".to_string()));
/// assert_eq!(environment.var("HOME"), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
}

impl MemoryEnvironment {
    /// Set the variable `name` to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
