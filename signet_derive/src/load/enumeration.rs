use crate::load::unknown_error;
use crate::model::{DeriveEnumeration, DeriveValue, DeriveVariant, IntermediateAttributes};
use crate::{ATTRIBUTE_SIGNET, MACRO_ENUMERATION};
use quote::quote;

impl TryFrom<syn::DeriveInput> for DeriveEnumeration {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let enum_name = value.ident.clone();

        if !value.generics.params.is_empty() {
            return Err(syn::Error::new(
                enum_name.span(),
                format!("Invalid - {MACRO_ENUMERATION} '{enum_name}' cannot be generic."),
            ));
        }

        match &value.data {
            syn::Data::Enum(de) => {
                let variants = de
                    .variants
                    .iter()
                    .map(DeriveVariant::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DeriveEnumeration {
                    enum_name,
                    variants,
                })
            }
            _ => Err(syn::Error::new(
                enum_name.span(),
                format!("Invalid - {MACRO_ENUMERATION} only applies to 'enum' data structures."),
            )),
        }
    }
}

impl TryFrom<&syn::Variant> for DeriveVariant {
    type Error = syn::Error;

    fn try_from(value: &syn::Variant) -> Result<Self, Self::Error> {
        let variant_name = value.ident.clone();

        if !matches!(value.fields, syn::Fields::Unit) {
            return Err(syn::Error::new(
                variant_name.span(),
                format!("Invalid - {MACRO_ENUMERATION} variant '{variant_name}' cannot hold fields."),
            ));
        }

        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident(ATTRIBUTE_SIGNET) {
                attributes = IntermediateAttributes::try_from(attribute)?;
            }
        }

        if let Some(singleton) = attributes.singletons.iter().next() {
            return Err(unknown_error(&variant_name, ATTRIBUTE_SIGNET, singleton));
        }

        for key in attributes.pairs.keys() {
            if key != "value" {
                return Err(unknown_error(&variant_name, ATTRIBUTE_SIGNET, key));
            }
        }

        let value = match attributes.single(&variant_name, "value")? {
            Some(value) => value,
            None => {
                let lowercase = variant_name.to_string().to_lowercase();
                DeriveValue {
                    tokens: quote! { #lowercase },
                }
            }
        };

        Ok(DeriveVariant {
            variant_name,
            value,
        })
    }
}
