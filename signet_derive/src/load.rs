mod attribute;
mod command;
mod enumeration;

use crate::model::{DeriveValue, IntermediateAttributes};

impl IntermediateAttributes {
    /// The single value of the pair `key`, if present.
    /// Errors when the pair is repeated.
    pub(self) fn single(
        &self,
        context: &syn::Ident,
        key: &str,
    ) -> Result<Option<DeriveValue>, syn::Error> {
        match self.pairs.get(key).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([value]) => Ok(Some(value.clone())),
            Some(_) => Err(syn::Error::new(
                context.span(),
                format!("Invalid - '{context}' repeats the attribute `{key}`."),
            )),
        }
    }
}

pub(self) fn unknown_error(
    context: &syn::Ident,
    attribute: &str,
    key: impl std::fmt::Display,
) -> syn::Error {
    syn::Error::new(
        context.span(),
        format!("Invalid - '{context}' has the unknown attribute `#[{attribute}({key})]`."),
    )
}
