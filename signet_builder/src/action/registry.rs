use std::collections::HashMap;
use std::sync::Arc;

use crate::action::{
    Action, FloatAction, IntAction, PathAction, StrAction, TimestampAction, UuidAction,
};
use crate::api::Argument;
use crate::error::ConfigurationError;
use crate::model::types;

/// Builds the [`Action`] for one parameter from its [`Argument`] metadata.
pub trait ActionFactory: Send + Sync {
    /// Create the action for the parameter `name`.
    fn create(
        &self,
        name: &str,
        argument: &Argument,
    ) -> Result<Arc<dyn Action>, ConfigurationError>;
}

impl<F> ActionFactory for F
where
    F: Fn(&str, &Argument) -> Result<Arc<dyn Action>, ConfigurationError> + Send + Sync,
{
    fn create(
        &self,
        name: &str,
        argument: &Argument,
    ) -> Result<Arc<dyn Action>, ConfigurationError> {
        self(name, argument)
    }
}

/// Maps type keys to the factories of their actions.
///
/// The built-in keys ([`types`](crate::types)) are always registered.
/// Register further keys to support custom parameter types.
///
/// ### Example
/// ```
/// # use signet_builder as signet;
/// use signet::{Action, ActionRegistry, IntAction};
/// use std::sync::Arc;
///
/// let mut registry = ActionRegistry::default();
/// registry.register(
///     "port",
///     |_name: &str, _argument: &signet::Argument| -> Result<Arc<dyn Action>, signet::ConfigurationError> {
///         Ok(Arc::new(IntAction))
///     },
/// );
/// assert!(registry.contains("port"));
/// assert!(registry.contains("int"));
/// ```
pub struct ActionRegistry {
    factories: HashMap<&'static str, Box<dyn ActionFactory>>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        let mut registry = Self {
            factories: HashMap::default(),
        };
        registry.register(types::INT, int_action);
        registry.register(types::FLOAT, float_action);
        registry.register(types::STR, str_action);
        registry.register(types::UUID, uuid_action);
        registry.register(types::PATH, path_action);
        registry.register(types::TIMESTAMP, timestamp_action);
        registry
    }
}

type Created = Result<Arc<dyn Action>, ConfigurationError>;

fn int_action(_name: &str, _argument: &Argument) -> Created {
    Ok(Arc::new(IntAction))
}

fn float_action(_name: &str, _argument: &Argument) -> Created {
    Ok(Arc::new(FloatAction))
}

fn str_action(_name: &str, _argument: &Argument) -> Created {
    Ok(Arc::new(StrAction))
}

fn uuid_action(_name: &str, _argument: &Argument) -> Created {
    Ok(Arc::new(UuidAction))
}

fn path_action(name: &str, argument: &Argument) -> Created {
    let checks = argument.path_checks(name)?;
    Ok(Arc::new(PathAction::new(checks)))
}

fn timestamp_action(_name: &str, argument: &Argument) -> Created {
    Ok(Arc::new(TimestampAction::new(argument.timestamp_formats())))
}

impl ActionRegistry {
    /// Register the `factory` under the type `key`.
    /// If repeated for the same `key`, only the final factory will apply.
    pub fn register(&mut self, key: &'static str, factory: impl ActionFactory + 'static) {
        self.factories.insert(key, Box::new(factory));
    }

    /// Whether the type `key` has a factory.
    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&dyn ActionFactory> {
        self.factories.get(key).map(|factory| factory.as_ref())
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&&str> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("ActionRegistry").field("keys", &keys).finish()
    }
}
