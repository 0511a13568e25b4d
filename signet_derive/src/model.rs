use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The loosely typed contents of a `#[name(..)]` attribute.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

/// A function decorated with `#[command]`.
#[derive(Debug, PartialEq, Eq)]
pub struct DeriveCommand {
    pub function: syn::ItemFn,
    pub command_name: DeriveValue,
    pub about: Option<String>,
    pub config_file: Option<DeriveValue>,
    pub parameters: Vec<DeriveParameter>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveParameter {
    pub name: syn::Ident,
    pub ty: syn::Type,
    pub default: Option<DeriveValue>,
    pub argument: Vec<ArgumentOption>,
}

/// One call on the `Argument` builder.
#[derive(Debug, PartialEq, Eq)]
pub struct ArgumentOption {
    pub method: syn::Ident,
    pub value: DeriveValue,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveEnumeration {
    pub enum_name: syn::Ident,
    pub variants: Vec<DeriveVariant>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveVariant {
    pub variant_name: syn::Ident,
    pub value: DeriveValue,
}
