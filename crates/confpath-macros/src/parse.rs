//! Parsing of `#[derive(Bind)]` input and `#[config(...)]` attributes.

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, LitStr};

/// Name of the helper attribute.
const CONFIG_ATTR: &str = "config";

/// A type deriving `Bind`.
#[derive(Debug)]
pub struct BindInput {
    /// The type name.
    pub ident: Ident,
    /// The type generics.
    pub generics: Generics,
    /// Bind through `Loadable` instead of field by field.
    pub loadable: bool,
    /// The named fields, in declaration order.
    pub fields: Vec<BindField>,
}

/// A field of a struct deriving `Bind`.
#[derive(Debug)]
pub struct BindField {
    /// The field identifier.
    pub ident: Ident,
    /// The path segment the field binds from.
    pub name: String,
    /// Leave the field untouched.
    pub skip: bool,
}

impl BindInput {
    /// Parses derive input.
    pub fn from_derive(input: DeriveInput) -> syn::Result<Self> {
        let loadable = parse_container_attrs(&input.attrs)?;

        let fields = if loadable {
            Vec::new()
        } else {
            match &input.data {
                Data::Struct(data) => match &data.fields {
                    Fields::Named(named) => named
                        .named
                        .iter()
                        .map(BindField::from_field)
                        .collect::<syn::Result<Vec<_>>>()?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(_) => {
                        return Err(syn::Error::new(
                            input.ident.span(),
                            "Bind needs named fields; use #[config(loadable)] for tuple structs",
                        ))
                    }
                },
                Data::Enum(_) | Data::Union(_) => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "Bind can only be derived for structs, or with #[config(loadable)]",
                    ))
                }
            }
        };

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            loadable,
            fields,
        })
    }
}

impl BindField {
    fn from_field(field: &syn::Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;

        let mut name = None;
        let mut skip = false;
        for attr in config_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new(value.span(), "name must not be empty"));
                    }
                    name = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    skip = true;
                } else {
                    return Err(meta.error("unknown config field attribute"));
                }
                Ok(())
            })?;
        }

        Ok(Self {
            name: name.unwrap_or_else(|| ident.unraw().to_string()),
            ident,
            skip,
        })
    }
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut loadable = false;
    for attr in config_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("loadable") {
                loadable = true;
                Ok(())
            } else {
                Err(meta.error("unknown config container attribute"))
            }
        })?;
    }
    Ok(loadable)
}

fn config_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident(CONFIG_ATTR))
}
