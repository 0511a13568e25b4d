mod bridge;
mod interface;
mod middleware;

pub(crate) use interface::{ConsoleInterface, UserInterface};
pub(crate) use middleware::Root;
pub use middleware::{Cli, Exit};

#[cfg(test)]
pub(crate) use interface::util;
