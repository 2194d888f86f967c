//! Path-addressed configuration access for INI, JSON, XML and YAML.
//!
//! This crate reads configuration documents of several formats through one
//! interface:
//! - `/`-separated paths address values in any format
//! - typed getters for strings, booleans, floats, integers and their arrays
//! - sub-documents via [`ConfigAccessor::get_config_part`]
//! - binding into typed structs with `#[derive(Bind)]`
//!
//! # Overview
//!
//! A parsed document is a [`Config`]:
//!
//! - [`IniConfig`] - `[section]` / `key = value` files (`conf`, `ini`)
//! - [`TreeConfig`] - JSON and YAML trees (`json`, `yaml`, `yml`)
//! - [`XmlConfig`] - XML elements, with `@name` segments for attributes (`xml`)
//!
//! Arrays are native arrays in JSON and YAML, and delimiter-separated text in
//! INI and XML.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use confpath::{create_config_from_str, load_value, Bind, ConfigAccessor};
//!
//! #[derive(Debug, Default, Bind)]
//! struct Http {
//!     addr: String,
//!     #[config(name = "timeout")]
//!     request_timeout: Duration,
//! }
//!
//! #[derive(Debug, Default, Bind)]
//! struct Settings {
//!     http: Http,
//!     workers: u32,
//!     #[config(skip)]
//!     computed: bool,
//! }
//!
//! # fn main() -> confpath::Result<()> {
//! let config = create_config_from_str(
//!     r#"
//!     workers: 4
//!     http:
//!       addr: 0.0.0.0:8080
//!       timeout: 30s
//!     "#,
//!     "yaml",
//! )?;
//!
//! assert_eq!(config.get_string("/http/addr")?, "0.0.0.0:8080");
//!
//! let mut settings = Settings::default();
//! load_value(&config, "/", &mut settings)?;
//! assert_eq!(settings.workers, 4);
//! assert_eq!(settings.http.request_timeout, Duration::from_secs(30));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

extern crate self as confpath;

mod accessor;
mod bind;
mod error;
mod helpers;
mod ini;
mod loader;
mod path;
mod tree;
mod value;
mod xml;

pub use accessor::{Config, ConfigAccessor, ValueGrabber, ValueSliceCreator};
pub use bind::{
    bind_loadable, bind_loadable_slice, bind_value, load_value, load_value_ignoring_errors,
    load_value_ignoring_missing_fields, tuned_load_value, Bind, LoadSettings, Loadable, Loader,
    Loaders,
};
pub use error::{ConfigError, Result};
pub use helpers::*;
pub use ini::{IniConfig, IniDocument, DEFAULT_SECTION};
pub use loader::*;
pub use path::*;
pub use tree::{TreeConfig, TreeNode};
pub use value::{parse_bool, parse_float, parse_int, split_values, RawValue};
pub use xml::{XmlConfig, XmlElement};

/// Derives [`Bind`] for a struct.
///
/// Every named field is bound at `path/<name>`, in declaration order.
///
/// - `#[config(name = "...")]` on a field replaces its path segment.
/// - `#[config(skip)]` on a field leaves it untouched.
/// - `#[config(loadable)]` on the type binds it through its [`Loadable`]
///   implementation instead of field by field.
pub use confpath_macros::Bind;
