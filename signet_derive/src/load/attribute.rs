use crate::model::{DeriveValue, IntermediateAttributes};
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use std::collections::{HashMap, HashSet};
use syn::parse::Parser;
use syn::punctuated::Punctuated;

type Expressions = Punctuated<syn::Expr, syn::Token![,]>;

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let expressions = value.parse_args_with(Expressions::parse_terminated)?;
        collect(expressions)
    }
}

impl TryFrom<TokenStream2> for IntermediateAttributes {
    type Error = syn::Error;

    /// Load the arguments of an attribute macro (ex: the `..` in `#[command(..)]`).
    fn try_from(value: TokenStream2) -> Result<Self, Self::Error> {
        let expressions = Expressions::parse_terminated.parse2(value)?;
        collect(expressions)
    }
}

fn collect(expressions: Expressions) -> Result<IntermediateAttributes, syn::Error> {
    let mut singletons = HashSet::default();
    let mut pairs: HashMap<String, Vec<DeriveValue>> = HashMap::default();

    for expression in expressions {
        match expression {
            syn::Expr::Assign(assignment) => {
                let left = assignment.left.to_token_stream();
                pairs.entry(left.to_string()).or_default().push(DeriveValue {
                    tokens: assignment.right.to_token_stream(),
                });
            }
            syn::Expr::Path(ref path) if path.path.get_ident().is_some() => {
                if let Some(ident) = path.path.get_ident() {
                    singletons.insert(ident.to_string());
                }
            }
            other => {
                return Err(syn::Error::new_spanned(
                    &other,
                    format!("Unparseable attribute: {}", other.to_token_stream()),
                ));
            }
        };
    }

    Ok(IntermediateAttributes { singletons, pairs })
}
