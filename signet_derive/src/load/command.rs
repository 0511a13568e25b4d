use crate::load::unknown_error;
use crate::model::{ArgumentOption, DeriveCommand, DeriveParameter, DeriveValue, IntermediateAttributes};
use crate::{ATTRIBUTE_ARG, MACRO_COMMAND};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

const COMMAND_KEYS: [&str; 3] = ["name", "about", "config_file"];
// The `Argument` builder methods, in the order they are applied.
const TEXT_OPTIONS: [&str; 3] = ["help", "envvar", "formats"];
const SWITCH_OPTIONS: [&str; 6] = [
    "exists",
    "file_okay",
    "dir_okay",
    "writable",
    "readable",
    "resolve_path",
];

impl DeriveCommand {
    /// Load the `function` decorated by `#[command(arguments)]`.
    /// The `#[arg(..)]` attributes are removed from the function's parameters.
    pub fn load(arguments: TokenStream2, mut function: syn::ItemFn) -> Result<Self, syn::Error> {
        let attributes = IntermediateAttributes::try_from(arguments)?;
        let function_name = function.sig.ident.clone();

        for key in attributes.pairs.keys() {
            if !COMMAND_KEYS.contains(&key.as_str()) {
                return Err(unknown_error(&function_name, MACRO_COMMAND, key));
            }
        }

        if let Some(singleton) = attributes.singletons.iter().next() {
            return Err(unknown_error(&function_name, MACRO_COMMAND, singleton));
        }

        if !function.sig.generics.params.is_empty() {
            return Err(syn::Error::new(
                function_name.span(),
                format!("Invalid - #[{MACRO_COMMAND}] '{function_name}' cannot be generic."),
            ));
        }

        if function.sig.asyncness.is_some() {
            return Err(syn::Error::new(
                function_name.span(),
                format!("Invalid - #[{MACRO_COMMAND}] '{function_name}' cannot be async."),
            ));
        }

        let command_name = match attributes.single(&function_name, "name")? {
            Some(value) => value,
            None => {
                let name = function_name.to_string();
                DeriveValue {
                    tokens: quote! { #name },
                }
            }
        };
        let about = match attributes.single(&function_name, "about")? {
            Some(value) => Some(literal_string(&function_name, "about", value)?),
            None => documentation(&function.attrs),
        };
        let config_file = attributes.single(&function_name, "config_file")?;

        let mut parameters = Vec::default();

        for input in function.sig.inputs.iter_mut() {
            match input {
                syn::FnArg::Receiver(receiver) => {
                    return Err(syn::Error::new_spanned(
                        receiver,
                        format!("Invalid - #[{MACRO_COMMAND}] '{function_name}' cannot take `self`."),
                    ));
                }
                syn::FnArg::Typed(typed) => parameters.push(DeriveParameter::load(typed)?),
            }
        }

        Ok(DeriveCommand {
            function,
            command_name,
            about,
            config_file,
            parameters,
        })
    }
}

impl DeriveParameter {
    fn load(value: &mut syn::PatType) -> Result<Self, syn::Error> {
        let name = match value.pat.as_ref() {
            syn::Pat::Ident(syn::PatIdent {
                ident,
                by_ref: None,
                subpat: None,
                ..
            }) => ident.clone(),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Invalid - a command parameter must be a plain identifier.",
                ));
            }
        };

        let mut attributes = IntermediateAttributes::default();
        let mut retained = Vec::default();

        for attribute in value.attrs.drain(..) {
            if attribute.path().is_ident(ATTRIBUTE_ARG) {
                let IntermediateAttributes { singletons, pairs } =
                    IntermediateAttributes::try_from(&attribute)?;
                attributes.singletons.extend(singletons);

                for (key, values) in pairs {
                    attributes.pairs.entry(key).or_default().extend(values);
                }
            } else {
                retained.push(attribute);
            }
        }

        value.attrs = retained;

        for key in attributes.pairs.keys() {
            if key != "default"
                && !TEXT_OPTIONS.contains(&key.as_str())
                && !SWITCH_OPTIONS.contains(&key.as_str())
            {
                return Err(unknown_error(&name, ATTRIBUTE_ARG, key));
            }
        }

        for singleton in &attributes.singletons {
            if !SWITCH_OPTIONS.contains(&singleton.as_str()) {
                return Err(unknown_error(&name, ATTRIBUTE_ARG, singleton));
            }
        }

        let default = attributes.single(&name, "default")?;
        let mut argument = Vec::default();

        for option in TEXT_OPTIONS {
            if let Some(value) = attributes.single(&name, option)? {
                argument.push(ArgumentOption {
                    method: syn::Ident::new(option, name.span()),
                    value,
                });
            }
        }

        for option in SWITCH_OPTIONS {
            let explicit = attributes.single(&name, option)?;

            if explicit.is_some() && attributes.singletons.contains(option) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("Invalid - '{name}' cannot be both `{option}` and `{option} = ..`."),
                ));
            }

            let value = match explicit {
                Some(value) => Some(value),
                None if attributes.singletons.contains(option) => Some(DeriveValue {
                    tokens: quote! { true },
                }),
                None => None,
            };

            if let Some(value) = value {
                argument.push(ArgumentOption {
                    method: syn::Ident::new(option, name.span()),
                    value,
                });
            }
        }

        Ok(DeriveParameter {
            name,
            ty: value.ty.as_ref().clone(),
            default,
            argument,
        })
    }
}

fn literal_string(context: &syn::Ident, key: &str, value: DeriveValue) -> Result<String, syn::Error> {
    match syn::parse2::<syn::LitStr>(value.tokens) {
        Ok(literal) => Ok(literal.value()),
        Err(_) => Err(syn::Error::new(
            context.span(),
            format!("Invalid - '{context}' requires a string literal for `{key}`."),
        )),
    }
}

/// The function's doc comment, with the common leading space removed.
fn documentation(attributes: &[syn::Attribute]) -> Option<String> {
    let lines: Vec<String> = attributes
        .iter()
        .filter(|attribute| attribute.path().is_ident("doc"))
        .filter_map(|attribute| match &attribute.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(text),
                        ..
                    }),
                ..
            }) => Some(text.value()),
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').unwrap_or(&line).trim_end().to_string())
        .collect();
    let about = lines.join("\n").trim().to_string();

    if about.is_empty() {
        None
    } else {
        Some(about)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use proc_macro2::Span;
    use quote::ToTokens;
    use syn::parse_quote;

    #[test]
    fn construct_command_empty() {
        // Setup
        let function: syn::ItemFn = parse_quote! {
            fn noop() {}
        };

        // Execute
        let command = DeriveCommand::load(TokenStream2::new(), function.clone()).unwrap();

        // Verify
        assert_eq!(
            command,
            DeriveCommand {
                function,
                command_name: DeriveValue {
                    tokens: quote! { "noop" },
                },
                about: None,
                config_file: None,
                parameters: Vec::default(),
            }
        );
    }

    #[test]
    fn construct_command() {
        // Setup
        let function: syn::ItemFn = parse_quote! {
            /// Report the weather.
            ///
            /// For one person.
            fn weather(
                name: String,
                #[arg(default = 14, help = "The user's age.", envvar = "AGE")] age: i64,
                #[arg(exists, dir_okay = false)] #[arg(formats = ["%Y"])] born: PathBuf,
            ) {}
        };

        // Execute
        let command =
            DeriveCommand::load(quote! { name = "forecast", config_file = "config" }, function)
                .unwrap();

        // Verify
        assert_eq!(
            command.command_name,
            DeriveValue {
                tokens: quote! { "forecast" },
            }
        );
        assert_eq!(
            command.about,
            Some("Report the weather.\n\nFor one person.".to_string())
        );
        assert_eq!(
            command.config_file,
            Some(DeriveValue {
                tokens: quote! { "config" },
            })
        );
        assert_eq!(
            command.parameters,
            vec![
                DeriveParameter {
                    name: ident("name"),
                    ty: parse_quote! { String },
                    default: None,
                    argument: Vec::default(),
                },
                DeriveParameter {
                    name: ident("age"),
                    ty: parse_quote! { i64 },
                    default: Some(DeriveValue {
                        tokens: quote! { 14 },
                    }),
                    argument: vec![
                        option("help", quote! { "The user's age." }),
                        option("envvar", quote! { "AGE" }),
                    ],
                },
                DeriveParameter {
                    name: ident("born"),
                    ty: parse_quote! { PathBuf },
                    default: None,
                    argument: vec![
                        option("formats", quote! { ["%Y"] }),
                        option("exists", quote! { true }),
                        option("dir_okay", quote! { false }),
                    ],
                },
            ]
        );

        // The helper attributes are consumed.
        let rendered = command.function.to_token_stream().to_string();
        assert!(!rendered.contains("arg"), "{rendered}");
    }

    #[test]
    fn construct_command_explicit_about() {
        // Setup
        let function: syn::ItemFn = parse_quote! {
            /// Ignored.
            fn noop() {}
        };

        // Execute
        let command = DeriveCommand::load(quote! { about = "Do nothing." }, function).unwrap();

        // Verify
        assert_eq!(command.about, Some("Do nothing.".to_string()));
    }

    #[test]
    fn construct_command_invalid() {
        let cases: Vec<(TokenStream2, syn::ItemFn, &str)> = vec![
            (quote! { program = "x" }, parse_quote! { fn noop() {} }, "unknown attribute"),
            (quote! { verbose }, parse_quote! { fn noop() {} }, "unknown attribute"),
            (quote! { about = 1 }, parse_quote! { fn noop() {} }, "string literal"),
            (TokenStream2::new(), parse_quote! { fn noop<T>(t: T) {} }, "generic"),
            (TokenStream2::new(), parse_quote! { async fn noop() {} }, "async"),
            (TokenStream2::new(), parse_quote! { fn noop(&self) {} }, "self"),
            (TokenStream2::new(), parse_quote! { fn noop((a, b): (i64, i64)) {} }, "plain identifier"),
            (TokenStream2::new(), parse_quote! { fn noop(#[arg(short = 'a')] a: i64) {} }, "unknown attribute"),
            (TokenStream2::new(), parse_quote! { fn noop(#[arg(help)] a: i64) {} }, "unknown attribute"),
            (TokenStream2::new(), parse_quote! { fn noop(#[arg(default = 1, default = 2)] a: i64) {} }, "repeats"),
            (TokenStream2::new(), parse_quote! { fn noop(#[arg(exists, exists = false)] a: PathBuf) {} }, "cannot be both"),
        ];

        for (arguments, function, message) in cases {
            // Execute
            let error = DeriveCommand::load(arguments, function).unwrap_err();

            // Verify
            assert_contains!(error.to_string(), message);
        }
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn option(method: &str, tokens: TokenStream2) -> ArgumentOption {
        ArgumentOption {
            method: ident(method),
            value: DeriveValue { tokens },
        }
    }
}
