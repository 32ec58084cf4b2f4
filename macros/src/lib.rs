use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::{Attribute, Data, DeriveInput, Fields, Meta, Token, Type, parse_macro_input};

/// Keys accepted inside #[field(...)]
const FIELD_KEYS: &[&str] = &["env", "default", "doc"];

/// Main macro for defining configuration structs bound from the environment
///
/// ```ignore
/// define_config! {
///     #[derive(Debug, Default)]
///     pub struct Config {
///         #[field(env = "PORT", default = "8080", doc = "Server port")]
///         pub port: i32,
///     }
/// }
/// ```
#[proc_macro]
pub fn define_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_config(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_config(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let struct_attrs = &input.attrs;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "define_config! does not support generic structs",
        ));
    }

    // Extract fields from the struct
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "define_config! only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "define_config! only supports structs",
            ));
        }
    };

    let mut field_defs = Vec::new();
    let mut descriptors = Vec::new();
    let mut slot_arms = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_vis = &field.vis;
        let field_type = &field.ty;

        // Our attribute is consumed; everything else is passed through
        let kept_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| !attr.path().is_ident("field"))
            .collect();
        field_defs.push(quote! {
            #(#kept_attrs)*
            #field_vis #field_name: #field_type
        });

        // Fields without #[field(...)] are not bound
        let Some(config) = parse_field_config(&field.attrs)? else {
            continue;
        };

        let name = field_name.to_string();
        let env_var = &config.env_var;
        let kind = classify(field_type);
        let value_type = kind.value_type_tokens();

        let mut descriptor = quote! {
            ::env_binder::FieldDescriptor::new(#name, #env_var, #value_type)
        };
        if let Some(default) = &config.default {
            descriptor = quote! { #descriptor.with_default(#default) };
        }
        if let Some(description) = &config.description {
            descriptor = quote! { #descriptor.with_description(#description) };
        }
        descriptors.push(descriptor);

        let slot = match kind {
            FieldKind::Supported(_) => quote! {
                ::env_binder::Slot::from(&mut self.#field_name)
            },
            FieldKind::Unsupported(type_name) => quote! {
                ::env_binder::Slot::Unsupported(#type_name)
            },
        };
        slot_arms.push(quote! {
            #name => ::std::option::Option::Some(#slot),
        });
    }

    // Generate the struct definition
    let struct_def = quote! {
        #(#struct_attrs)*
        #vis struct #struct_name {
            #(#field_defs),*
        }
    };

    // Generate Record and Bindable implementations
    let record_impl = quote! {
        impl ::env_binder::Record for #struct_name {
            fn schema() -> ::env_binder::Schema {
                const FIELDS: &[::env_binder::FieldDescriptor] = &[
                    #(#descriptors),*
                ];
                ::env_binder::Schema::from_static(FIELDS)
            }

            fn slot(&mut self, name: &str) -> ::std::option::Option<::env_binder::Slot<'_>> {
                match name {
                    #(#slot_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl<'a> ::env_binder::Bindable<'a> for &'a mut #struct_name {
            fn into_record(
                self,
            ) -> ::std::result::Result<&'a mut dyn ::env_binder::Record, ::env_binder::BindError> {
                ::std::result::Result::Ok(self)
            }
        }

        ::env_binder::__reject_by_value!(#struct_name);
    };

    Ok(quote! {
        #struct_def
        #record_impl
    })
}

#[derive(Debug)]
struct FieldConfig {
    env_var: String,
    default: Option<String>,
    description: Option<String>,
}

/// How a field's Rust type maps onto the binder's value types
enum FieldKind {
    Supported(proc_macro2::TokenStream),
    Unsupported(String),
}

impl FieldKind {
    fn value_type_tokens(&self) -> proc_macro2::TokenStream {
        match self {
            FieldKind::Supported(tokens) => tokens.clone(),
            FieldKind::Unsupported(type_name) => quote! {
                ::env_binder::ValueType::Unsupported(#type_name)
            },
        }
    }
}

/// Classify by the last path segment, so `std::string::String` works too.
/// Type aliases are not resolved and end up unsupported.
fn classify(ty: &Type) -> FieldKind {
    if let Type::Path(type_path) = ty {
        if type_path.qself.is_none() {
            if let Some(segment) = type_path.path.segments.last() {
                if segment.arguments.is_empty() {
                    let constant = match segment.ident.to_string().as_str() {
                        "String" => Some(quote!(STRING)),
                        "i8" => Some(quote!(I8)),
                        "i16" => Some(quote!(I16)),
                        "i32" => Some(quote!(I32)),
                        "i64" => Some(quote!(I64)),
                        "isize" => Some(quote!(ISIZE)),
                        "f32" => Some(quote!(F32)),
                        "f64" => Some(quote!(F64)),
                        "bool" => Some(quote!(BOOL)),
                        _ => None,
                    };
                    if let Some(constant) = constant {
                        return FieldKind::Supported(quote! {
                            ::env_binder::ValueType::#constant
                        });
                    }
                }
            }
        }
    }

    FieldKind::Unsupported(type_name(ty))
}

/// Render a type the way it is written: tokens are joined tight, except that
/// adjacent words (`'static str`, `dyn Trait`) keep a single space.
fn type_name(ty: &Type) -> String {
    let rendered = quote!(#ty).to_string();
    let mut name = String::with_capacity(rendered.len());
    let mut previous: Option<&str> = None;

    for token in rendered.split_whitespace() {
        if previous.is_some_and(|p| ends_word(p) && starts_word(token)) {
            name.push(' ');
        }
        name.push_str(token);
        previous = Some(token);
    }
    name
}

fn ends_word(token: &str) -> bool {
    token
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn starts_word(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '\'')
}

/// Parse #[field(env = "X", default = "Y", doc = "Z")] syntax
fn parse_field_list(meta_list: &syn::MetaList) -> syn::Result<HashMap<String, String>> {
    let mut values = HashMap::new();

    meta_list.parse_nested_meta(|meta| {
        let key = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("expected identifier"))?
            .to_string();

        if !FIELD_KEYS.contains(&key.as_str()) {
            return Err(meta.error(format!(
                "unknown key `{}`, expected one of: env, default, doc",
                key
            )));
        }
        if values.contains_key(&key) {
            return Err(meta.error(format!("duplicate key `{}`", key)));
        }
        if !meta.input.peek(Token![=]) {
            return Err(meta.error(format!("`{}` needs a string value: {} = \"...\"", key, key)));
        }

        meta.input.parse::<Token![=]>()?;
        let value: syn::LitStr = meta.input.parse()?;
        values.insert(key, value.value());

        Ok(())
    })?;

    Ok(values)
}

fn parse_field_config(attrs: &[Attribute]) -> syn::Result<Option<FieldConfig>> {
    // Find the #[field(...)] attribute
    let Some(field_attr) = attrs.iter().find(|attr| attr.path().is_ident("field")) else {
        return Ok(None);
    };

    // Parse it as a Meta::List
    let mut parsed = match &field_attr.meta {
        Meta::List(list) => parse_field_list(list)?,
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field attribute must be a list: #[field(env = \"...\", ...)]",
            ));
        }
    };

    // Extract env (required)
    let env_var = match parsed.remove("env") {
        Some(env) if !env.is_empty() => env,
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field must have env = \"VAR_NAME\"",
            ));
        }
    };

    Ok(Some(FieldConfig {
        env_var,
        default: parsed.remove("default"),
        description: parsed.remove("doc").map(|doc| doc.trim().to_string()),
    }))
}
