//! Builder module for `signet`.
//! See the `signet` crate root for full details.
#![deny(missing_docs)]
mod action;
mod api;
mod compiler;
mod environment;
mod error;
mod model;
mod parser;
mod reconcile;
pub mod prelude;

pub use action::*;
pub use api::*;
pub use environment::{Environment, MemoryEnvironment, ProcessEnvironment};
pub use error::*;
pub use model::*;
pub use parser::{Cli, Exit};

pub use anyhow;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
