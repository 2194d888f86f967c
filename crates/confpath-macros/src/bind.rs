//! `#[derive(Bind)]` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput};

use crate::parse::BindInput;

/// Expands `#[derive(Bind)]`.
pub fn expand_bind(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let bind = BindInput::from_derive(input)?;
    Ok(generate_bind_impl(&bind))
}

fn generate_bind_impl(input: &BindInput) -> TokenStream {
    let ident = &input.ident;

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::confpath::Bind));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = if input.loadable {
        quote! {
            fn bind(
                &mut self,
                config: &::confpath::Config,
                path: &str,
                _settings: &::confpath::LoadSettings,
            ) -> ::confpath::Result<()> {
                ::confpath::bind_loadable(self, config, path)
            }

            fn bind_slice(
                config: &::confpath::Config,
                path: &str,
                settings: &::confpath::LoadSettings,
            ) -> ::confpath::Result<::std::vec::Vec<Self>> {
                ::confpath::bind_loadable_slice(config, path, settings)
            }
        }
    } else {
        let binds: Vec<TokenStream> = input
            .fields
            .iter()
            .filter(|field| !field.skip)
            .map(|field| {
                let field_ident = &field.ident;
                let name = &field.name;
                quote! {
                    ::confpath::bind_value(
                        config,
                        settings,
                        &::confpath::join_path([path, #name]),
                        &mut self.#field_ident,
                    )?;
                }
            })
            .collect();

        let unused = binds
            .is_empty()
            .then(|| quote! { let _ = (config, path, settings); });

        quote! {
            fn bind(
                &mut self,
                config: &::confpath::Config,
                path: &str,
                settings: &::confpath::LoadSettings,
            ) -> ::confpath::Result<()> {
                #unused
                #(#binds)*
                ::std::result::Result::Ok(())
            }
        }
    };

    quote! {
        impl #impl_generics ::confpath::Bind for #ident #ty_generics #where_clause {
            #body
        }
    }
}
