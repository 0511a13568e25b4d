//! Traits which, typically, may be imported without concern: `use signet::prelude::*`.

pub use crate::action::Action;
pub use crate::api::{Declared, Enumeration, IntoOutcome};
pub use crate::environment::Environment;
