//! Derive module for `signet`.
//! See the `signet` crate root for full details.
extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::{DeriveCommand, DeriveEnumeration};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

pub(crate) const MACRO_COMMAND: &str = "command";
pub(crate) const MACRO_ENUMERATION: &str = "Enumeration";
pub(crate) const ATTRIBUTE_ARG: &str = "arg";
pub(crate) const ATTRIBUTE_SIGNET: &str = "signet";

/// Expose a function as a `signet::Command`.
///
/// Generates `fn <name>_command() -> signet::Command`, next to the (unchanged) function.
/// Each function parameter becomes a command parameter of the same name and type.
/// The function's doc comment is the command's about message.
///
/// Command options: `#[command(name = "..", about = "..", config_file = "..")]`.
///
/// Parameter options, via `#[arg(..)]`:
/// * `default = <expr>`
/// * `help = "..."`, `envvar = "..."`, `formats = ["..", ..]`
/// * `exists`, `file_okay`, `dir_okay`, `writable`, `readable`, `resolve_path` (each optionally `= <bool>`)
#[proc_macro_attribute]
pub fn command(arguments: TokenStream, item: TokenStream) -> TokenStream {
    let function = syn::parse_macro_input!(item as syn::ItemFn);

    match DeriveCommand::load(arguments.into(), function) {
        Ok(command) => TokenStream2::from(command).into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Expose a unit enum as a `signet::Enumeration` (and `signet::Declared`).
///
/// Each variant is a choice, selected by its lowercase name, or `#[signet(value = "..")]`.
#[proc_macro_derive(Enumeration, attributes(signet))]
pub fn enumeration(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveEnumeration::try_from(derive_input) {
        Ok(enumeration) => TokenStream2::from(enumeration).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
