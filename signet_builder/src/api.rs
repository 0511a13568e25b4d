mod argument;
mod arguments;
mod command;
mod core;
mod declared;
mod parameter;

pub use self::core::{run, Application};
pub use argument::Argument;
pub use arguments::Arguments;
pub(crate) use command::Handler;
pub use command::{Command, IntoOutcome, Outcome};
pub use declared::{enumeration, Declared, Enumeration};
pub use parameter::Parameter;
pub(crate) use parameter::ParameterDescriptor;
