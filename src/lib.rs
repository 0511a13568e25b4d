//! `signet` derives a command line interface from the signature of an ordinary function.
//!
//! Write the function you want to run, with the parameters it needs.
//! `signet` reads each parameter's name, type and default, and exposes them on the Cli:
//! * *Typed parameters*:
//! Each parameter is parsed and validated according to its declared type before the function is called.
//! The function only ever receives well typed values.
//! * *Defaults as options*:
//! Parameters without a default are positional (and mandatory).
//! Parameters with a default are exposed as `--name VALUE`.
//! Boolean parameters are always toggles `--name` / `--no-name`.
//! * *Layered defaults*:
//! A default may be read from an environment variable, and a command may read its values from a config file.
//! Values given on the command line always win.
//! * *Sub-commands*:
//! An [`Application`] exposes each function as the sub-command of its own name.
//!
//! # Usage
//! via the `#[command]` attribute:
//! ```no_run
#![doc = include_str!("../demos/hello_world.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ hello_world greet --help
//! Greet someone.
//!
//! Usage: hello_world greet [OPTIONS] <NAME>
//!
//! Arguments:
//!   <NAME>
//!
//! Options:
//!       --surname <SURNAME>  - [default: Holy]
//!   -h, --help               Print help
//!
//! $ hello_world greet Alice
//! Hello Alice Holy
//!
//! $ hello_world author Alice Smith
//! My name Alice Smith
//! My picture: ./my_pic.jpeg
//! ```
//!
//! # Types
//! The supported parameter types, and how their values are read:
//! ```console
//! Type            | Cli value
//! ------------------------------------------------------------------
//! bool            | toggle: --name / --no-name
//! i64             | integer
//! f64             | floating point number (integers widen)
//! String          | text
//! Uuid            | hyphenated UUID
//! PathBuf         | path, with optional checks (exists, readable, ..)
//! NaiveDateTime   | timestamp, in one of the parameter's formats
//! Enumeration     | one of the enumeration's values
//! Option<T>       | T, or absent (requires a default)
//! ```
//!
//! Further types are supported by implementing [`Declared`], and registering an [`Action`] for the type on the
//! [`Application`] (see [`Application::register`]).
//!
//! ### Enumerations
//! Unit enums become choices via `#[derive(Enumeration)]`.
//! ```no_run
#![doc = include_str!("../demos/weather.rs")]
//! ```
//!
//! ```console
//! $ weather --config-file weather.json --name Alice --is-rainy
//! Hello Alice (14), the sky is Clear.
//! Bring an umbrella.
//!
//! $ weather --config-file weather.json --sky hail
//! error: argument sky: invalid choice: 'hail' (choose from 'clear', 'cloudy', 'storm')
//! ```
//!
//! # Value precedence
//! Each parameter's value is resolved from the first of:
//! 1. The command line.
//! 2. The config file, when the command declares one (JSON, or TOML for a `.toml` file).
//! 3. The environment variable, when the parameter declares one (read once, when the Cli is built).
//! 4. The parameter's default.
//!
//! Parameters left without a value are reported together, before the function is called.
//!
//! # Builder Api
//! The `#[command]` attribute is a thin layer over the builder Api, which may also be used directly.
//! ```no_run
#![doc = include_str!("../demos/lab_runner.rs")]
//! ```
pub mod derive;

pub use derive::{command, Enumeration};
pub use signet_builder::*;
