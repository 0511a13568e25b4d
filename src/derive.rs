//! Derive Api for `signet` configuration.
//!
//! ### Commands
//! Decorate a function with `#[command]`.
//! This generates a function `<name>_command() -> Command` which exposes the function on the Cli.
//! The function itself is left unchanged, and may still be called directly.
//!
//! ```
//! use signet::{command, Cli, Exit};
//!
//! /// Add two numbers.
//! #[command]
//! fn add(a: i64, #[arg(default = 1)] b: i64) {
//!     println!("{}", a + b);
//! }
//!
//! let cli = Cli::single(add_command()).unwrap();
//! assert_eq!(cli.invoke(&["2", "--b", "3"]).unwrap(), Exit::Completed);
//! ```
//!
//! The function's parameters map onto the Cli as follows:
//! ```console
//! Parameter                         | Cli
//! ---------------------------------------------------------------
//! name: T                           | positional NAME
//! #[arg(default = ..)] name: T      | option --name NAME
//! name: bool                        | toggle --name / --no-name (mandatory)
//! #[arg(default = ..)] name: bool   | toggle --name / --no-name
//! ```
//!
//! The function may return `()`, an [`Outcome`](crate::Outcome), or a `Result` of these (ex: `anyhow::Result<()>`).
//!
//! ### Command Configuration
//! `#[command(..)]` accepts:
//! * `name = ".."`: the command's name on the Cli (default: the function's name).
//! * `about = ".."`: the command's about message (default: the function's doc comment).
//! * `config_file = ".."`: the flag of a config file from which the parameter values are read.
//!
//! ### Parameter Configuration
//! `#[arg(..)]` accepts:
//! * `default = <expr>`: the parameter's default value (any expression which converts `Into` the parameter's type).
//! * `help = ".."`: the parameter's help message.
//! * `envvar = ".."`: the environment variable which overrides the default.
//! * `formats = ["..", ..]`: the `strftime` formats of a timestamp parameter.
//! * `exists`, `file_okay`, `dir_okay`, `readable`, `writable`, `resolve_path`: the checks of a path parameter.
//! Each may be given as a flag (meaning `true`), or as `= <bool>`.
//!
//! ### Enumerations
//! `#[derive(Enumeration)]` applies to enums of unit variants.
//! Each variant is selected by its lowercase name, unless overridden with `#[signet(value = "..")]`.
//!
//! ```
//! use signet::Enumeration;
//!
//! #[derive(Debug, PartialEq, Enumeration)]
//! enum Color {
//!     Red,
//!     #[signet(value = "dark-blue")]
//!     DarkBlue,
//! }
//!
//! assert_eq!(Color::DarkBlue.value(), "dark-blue");
//! assert_eq!(Color::members(), vec![Color::Red, Color::DarkBlue]);
//! ```
pub use signet_derive::*;
