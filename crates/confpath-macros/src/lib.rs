//! Derive macro for `confpath` configuration binding.
//!
//! `#[derive(Bind)]` generates an implementation of `confpath::Bind` that
//! binds each named field from `path/<field name>`, in declaration order.
//! Use the `confpath` re-export rather than depending on this crate directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use confpath::Bind;
//!
//! #[derive(Default, Bind)]
//! struct Database {
//!     #[config(name = "connection-string")]
//!     url: String,
//!     pool_size: u32,
//!     #[config(skip)]
//!     connected: bool,
//! }
//! ```
//!
//! # Attributes
//!
//! - `#[config(name = "...")]` on a field: path segment to bind from
//! - `#[config(skip)]` on a field: never touched by binding
//! - `#[config(loadable)]` on the type: bind through `confpath::Loadable`

mod bind;
mod parse;

use proc_macro::TokenStream;

/// Derives `confpath::Bind`.
///
/// Generic type parameters receive a `confpath::Bind` bound.
#[proc_macro_derive(Bind, attributes(config))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::expand_bind(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
