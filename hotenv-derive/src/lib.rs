//! Derive macro implementation for hotenv

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Extract `T` from `EnvRef<T>`
fn extract_env_ref_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "EnvRef" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// `HotEnv` derive macro
///
/// Generates `from_env()` and `from_registry()` on a struct whose fields are
/// all `EnvRef<T>`. Each field is registered under its environment variable
/// name, so the struct can be rebuilt at any time and still share the cells
/// of earlier instances.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to all env var names
///
/// **Field-level**:
/// - `#[env(name = "CUSTOM_NAME")]`: Custom environment variable name
/// - `#[env(default)]`: Use `Default::default()` (same as no default)
/// - `#[env(default = value)]`: Use explicit default value
/// - `#[env(converter = "func")]`: Use a custom converter instead of `FromEnv`
///
/// # Example
///
/// See the `hotenv` crate documentation for usage examples.
#[proc_macro_derive(HotEnv, attributes(env))]
pub fn derive_hotenv(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let prefix = StructAttrs::from_attrs(&input.attrs)?.prefix;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "HotEnv only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(input, "HotEnv only supports structs"));
        }
    };

    let field_initializers = fields
        .iter()
        .map(|field| {
            let field_name = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            let attrs = FieldAttrs::from_field(field)?;

            let value_type = extract_env_ref_inner_type(&field.ty).ok_or_else(|| {
                syn::Error::new_spanned(&field.ty, "HotEnv fields must have type EnvRef<T>")
            })?;

            let base_name = attrs
                .name
                .unwrap_or_else(|| field_name.to_string().to_uppercase());
            let env_var_name = format!("{}{}", prefix, base_name);

            let default_value = attrs
                .default
                .unwrap_or_else(|| quote! { ::core::default::Default::default() });

            let converter = match attrs.converter {
                Some(path) => quote! { #path },
                None => quote! { <#value_type as ::hotenv::FromEnv>::from_env_str },
            };

            Ok(quote! {
                #field_name: __registry.get_or_register::<#value_type, _, _>(
                    #env_var_name,
                    #default_value,
                    #converter,
                )
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Register every field in the process-wide registry
            ///
            /// # Panics
            ///
            /// Panics if a variable was registered earlier with a different type.
            pub fn from_env() -> Self {
                Self::from_registry(::hotenv::Registry::global())
            }

            /// Register every field in `registry`
            ///
            /// # Panics
            ///
            /// Panics if a variable was registered earlier with a different type.
            pub fn from_registry(__registry: &::hotenv::Registry) -> Self {
                Self {
                    #(#field_initializers),*
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_err(input: DeriveInput) -> String {
        expand(&input).unwrap_err().to_string()
    }

    #[test]
    fn test_rejects_enum() {
        let err = expand_err(parse_quote! {
            enum Config { A, B }
        });
        assert_eq!(err, "HotEnv only supports structs");
    }

    #[test]
    fn test_rejects_tuple_struct() {
        let err = expand_err(parse_quote! {
            struct Config(EnvRef<u16>);
        });
        assert_eq!(err, "HotEnv only supports structs with named fields");
    }

    #[test]
    fn test_rejects_plain_field_type() {
        let err = expand_err(parse_quote! {
            struct Config {
                port: u16,
            }
        });
        assert_eq!(err, "HotEnv fields must have type EnvRef<T>");
    }

    #[test]
    fn test_rejects_unknown_field_attribute() {
        let err = expand_err(parse_quote! {
            struct Config {
                #[env(unknown = "x")]
                port: EnvRef<u16>,
            }
        });
        assert_eq!(err, "unsupported env attribute");
    }

    #[test]
    fn test_expands_prefixed_names() {
        let input: DeriveInput = parse_quote! {
            #[env(prefix = "APP_")]
            struct Config {
                port: EnvRef<u16>,
                #[env(name = "HOST_NAME")]
                host: EnvRef<String>,
            }
        };
        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("\"APP_PORT\""), "{tokens}");
        assert!(tokens.contains("\"APP_HOST_NAME\""), "{tokens}");
        assert!(tokens.contains("from_registry"), "{tokens}");
    }
}
