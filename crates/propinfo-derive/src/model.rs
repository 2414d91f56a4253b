use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Visibility, ext::IdentExt,
};

// derive_model
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    expand(&input).unwrap_or_else(Error::into_compile_error)
}

fn expand(input: &DeriveInput) -> Result<TokenStream, Error> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Model cannot be derived for generic structs",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            ident,
            "Model can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new_spanned(
            &data.fields,
            "Model can only be derived for structs with named fields",
        ));
    };

    let class_name = ModelOptions::parse(&input.attrs)?
        .name
        .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));
    check_name(&class_name)?;

    let mut seen = HashSet::new();
    let mut props = Vec::new();
    for field in &named.named {
        let Some(prop) = Prop::from_field(field)? else {
            continue;
        };
        if !seen.insert(prop.name.value()) {
            return Err(Error::new_spanned(
                &prop.name,
                format!("duplicate property name '{}'", prop.name.value()),
            ));
        }
        props.push(prop);
    }

    if props.is_empty() {
        return Err(Error::new_spanned(ident, "Model needs at least one property"));
    }

    let statics = props.iter().map(|prop| prop.static_tokens(ident));
    let accessors = props.iter().map(Prop::accessor_tokens);
    let registrations = props.iter().map(|prop| {
        let static_ident = &prop.static_ident;
        quote!(.property(&#static_ident))
    });
    let ident_str = ident.unraw().to_string();

    // statics live in an anonymous const so each model gets its own namespace
    Ok(quote! {
        const _: () = {
            #(#statics)*

            impl #ident {
                #(#accessors)*
            }

            impl ::propinfo::traits::Model for #ident {
                fn class_info() -> &'static ::propinfo::model::ClassInfo<Self> {
                    static CLASS: ::std::sync::LazyLock<::propinfo::model::ClassInfo<#ident>> =
                        ::std::sync::LazyLock::new(|| {
                            ::propinfo::model::ClassInfoBuilder::new(#class_name)
                                .path(::core::concat!(::core::module_path!(), "::", #ident_str))
                                #(#registrations)*
                                .build()
                                .unwrap_or_else(|err| {
                                    ::core::panic!("invalid model `{}`: {}", #ident_str, err)
                                })
                        });

                    &CLASS
                }
            }
        };
    })
}

///
/// ModelOptions
///

#[derive(Default)]
struct ModelOptions {
    name: Option<LitStr>,
}

impl ModelOptions {
    fn parse(attrs: &[Attribute]) -> Result<Self, Error> {
        let mut opts = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("model")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    opts.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported model option"))
                }
            })?;
        }

        Ok(opts)
    }
}

///
/// PropOptions
///

#[derive(Default)]
struct PropOptions {
    name: Option<LitStr>,
    sql: Option<LitStr>,
    required: bool,
    network_transient: bool,
    storage_transient: bool,
    skip: bool,
}

impl PropOptions {
    fn parse(attrs: &[Attribute]) -> Result<Self, Error> {
        let mut opts = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("prop")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    opts.required = true;
                } else if meta.path.is_ident("network_transient") {
                    opts.network_transient = true;
                } else if meta.path.is_ident("storage_transient") {
                    opts.storage_transient = true;
                } else if meta.path.is_ident("transient") {
                    opts.network_transient = true;
                    opts.storage_transient = true;
                } else if meta.path.is_ident("skip") {
                    opts.skip = true;
                } else if meta.path.is_ident("name") {
                    opts.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("sql") {
                    let sql: LitStr = meta.value()?.parse()?;
                    if sql.value().trim().is_empty() {
                        return Err(Error::new_spanned(sql, "sql type cannot be empty"));
                    }
                    opts.sql = Some(sql);
                } else {
                    return Err(meta.error("unsupported prop option"));
                }

                Ok(())
            })?;
        }

        Ok(opts)
    }
}

///
/// Prop
///

struct Prop<'a> {
    field: &'a Ident,
    ty: &'a syn::Type,
    vis: &'a Visibility,
    name: LitStr,
    static_ident: Ident,
    opts: PropOptions,
}

impl<'a> Prop<'a> {
    fn from_field(field: &'a Field) -> Result<Option<Self>, Error> {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(Error::new_spanned(field, "expected a named field"));
        };

        let mut opts = PropOptions::parse(&field.attrs)?;
        if opts.skip {
            return Ok(None);
        }

        let name = opts
            .name
            .take()
            .unwrap_or_else(|| LitStr::new(&field_ident.unraw().to_string(), field_ident.span()));
        check_name(&name)?;

        // field case is kept so `userId` and `userid` stay distinct
        let static_ident = format_ident!(
            "__PROPINFO_{}",
            field_ident.unraw(),
            span = Span::call_site()
        );

        Ok(Some(Self {
            field: field_ident,
            ty: &field.ty,
            vis: &field.vis,
            name,
            static_ident,
            opts,
        }))
    }

    fn static_tokens(&self, owner: &Ident) -> TokenStream {
        let Self {
            field,
            ty,
            name,
            static_ident,
            opts,
            ..
        } = self;

        let mut meta = quote! {
            ::propinfo::property::PropertyMeta::new(
                #name,
                <#ty as ::propinfo::traits::FieldValue>::VALUE_TYPE,
            )
        };
        if opts.required {
            meta.extend(quote!(.required()));
        }
        if opts.network_transient {
            meta.extend(quote!(.network_transient()));
        }
        if opts.storage_transient {
            meta.extend(quote!(.storage_transient()));
        }
        if let Some(sql) = &opts.sql {
            meta.extend(quote!(.sql(#sql)));
        }

        quote! {
            #[doc(hidden)]
            #[allow(non_upper_case_globals)]
            static #static_ident: ::propinfo::property::Property<#owner, #ty> =
                ::propinfo::property::Property::with_meta(
                    #meta,
                    |obj| &obj.#field,
                    |obj| &mut obj.#field,
                );
        }
    }

    fn accessor_tokens(&self) -> TokenStream {
        let Self {
            field,
            ty,
            vis,
            static_ident,
            ..
        } = self;
        let accessor = format_ident!("{}_property", field.unraw());

        // building the class first binds the property to its owner
        quote! {
            #[must_use]
            #[allow(non_snake_case)]
            #vis fn #accessor() -> &'static ::propinfo::property::Property<Self, #ty> {
                let _ = <Self as ::propinfo::traits::Model>::class_info();
                &#static_ident
            }
        }
    }
}

// [A-Za-z_][A-Za-z0-9_]*
fn check_name(name: &LitStr) -> Result<(), Error> {
    let value = name.value();
    let mut chars = value.chars();

    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(Error::new_spanned(
            name,
            format!("'{value}' is not a valid identifier"),
        ))
    }
}

///
/// TESTS
///
