use crate::model::{ArgumentOption, DeriveCommand, DeriveEnumeration, DeriveParameter, DeriveVariant};
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};

impl From<DeriveCommand> for TokenStream2 {
    fn from(value: DeriveCommand) -> Self {
        let DeriveCommand {
            function,
            command_name,
            about,
            config_file,
            parameters,
        } = value;
        let function_name = &function.sig.ident;
        let visibility = &function.vis;
        let command_function = format_ident!("{}_command", function_name);
        let command_name = command_name.tokens;
        let about = about.map(|about| quote! { .about(#about) });
        let config_file = config_file.map(|flag| {
            let flag = flag.tokens;
            quote! { .config_file(#flag) }
        });

        let handler = if parameters.is_empty() {
            quote! {
                |_: ::signet::Arguments| -> ::signet::anyhow::Result<::signet::Outcome> {
                    ::signet::IntoOutcome::into_outcome(#function_name())
                }
            }
        } else {
            let takes = parameters.iter().map(|parameter| {
                let ty = &parameter.ty;
                let name = parameter.name.to_string();
                quote! { __signet_arguments.take::<#ty>(#name)? }
            });

            quote! {
                |mut __signet_arguments: ::signet::Arguments| -> ::signet::anyhow::Result<::signet::Outcome> {
                    ::signet::IntoOutcome::into_outcome(#function_name(#( #takes ),*))
                }
            }
        };
        let parameters = parameters.into_iter().map(TokenStream2::from);

        quote! {
            #function

            #visibility fn #command_function() -> ::signet::Command {
                ::signet::Command::new(#command_name, #handler)
                    #about
                    #config_file
                    #( #parameters )*
            }
        }
    }
}

impl From<DeriveParameter> for TokenStream2 {
    fn from(value: DeriveParameter) -> Self {
        let DeriveParameter {
            name,
            ty,
            default,
            argument,
        } = value;
        let name = name.to_string();
        let default = default.map(|default| {
            let default = default.tokens;
            quote! { .default(#default) }
        });
        let argument = if argument.is_empty() {
            None
        } else {
            let options = argument.into_iter().map(|ArgumentOption { method, value }| {
                let value = value.tokens;
                quote! { .#method(#value) }
            });
            Some(quote! { .argument(::signet::Argument::new() #( #options )*) })
        };

        quote! {
            .parameter(::signet::Parameter::<#ty>::new(#name) #default #argument)
        }
    }
}

impl From<DeriveEnumeration> for TokenStream2 {
    fn from(value: DeriveEnumeration) -> Self {
        let DeriveEnumeration {
            enum_name,
            variants,
        } = value;
        let members = variants.iter().map(|DeriveVariant { variant_name, .. }| {
            quote! { #enum_name::#variant_name }
        });
        let values = variants.iter().map(
            |DeriveVariant {
                 variant_name,
                 value,
             }| {
                let value = &value.tokens;
                quote! { #enum_name::#variant_name => ::std::string::String::from(#value), }
            },
        );

        quote! {
            impl ::signet::Enumeration for #enum_name {
                fn members() -> ::std::vec::Vec<Self> {
                    ::std::vec![#( #members ),*]
                }

                fn value(&self) -> ::std::string::String {
                    match *self {
                        #( #values )*
                    }
                }
            }

            impl ::signet::Declared for #enum_name {
                fn declared_type() -> ::signet::DeclaredType {
                    ::signet::enumeration::declared_type::<Self>()
                }

                fn from_value(value: ::signet::Value) -> ::std::option::Option<Self> {
                    ::signet::enumeration::from_value(value)
                }

                fn into_value(self) -> ::signet::Value {
                    ::signet::enumeration::into_value(self)
                }
            }
        }
    }
}
