//! Binding configuration into typed values.
//!
//! A target type implements [`Bind`], usually through `#[derive(Bind)]`.
//! Binding walks the target recursively: structs bind each field at
//! `path/<field name>`, vectors read arrays, scalars read single values.
//! Before descending, a leaf type registered in [`LoadSettings::loaders`] is
//! read as a string and handed to its loader; [`Loadable`] types parse
//! themselves from a string.
//!
//! # Example
//!
//! ```
//! use confpath::{create_config_from_str, load_value, Bind};
//!
//! #[derive(Debug, Default, Bind)]
//! struct Server {
//!     host: String,
//!     #[config(name = "listen-port")]
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! # fn main() -> confpath::Result<()> {
//! let config = create_config_from_str(
//!     "<server><host>localhost</host><listen-port>8080</listen-port><tags>a b</tags></server>",
//!     "xml",
//! )?;
//!
//! let mut server = Server::default();
//! load_value(&config, "/server", &mut server)?;
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.tags, vec!["a", "b"]);
//! # Ok(())
//! # }
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, trace};

use crate::accessor::{Config, ConfigAccessor};
use crate::error::{ConfigError, Result};
use crate::path::DEFAULT_ARRAY_DELIMITER;

/// A value that can be filled from configuration.
pub trait Bind: Sized + 'static {
    /// Fills `self` from the value at `path`.
    ///
    /// Implementations leave `self` unchanged when reading fails. Compound
    /// implementations keep fields bound before the failure.
    fn bind(&mut self, config: &Config, path: &str, settings: &LoadSettings) -> Result<()>;

    /// Reads an array of values at `path`.
    ///
    /// Types without an array representation keep the default, which fails
    /// with [`ConfigError::UnsupportedType`].
    fn bind_slice(config: &Config, path: &str, settings: &LoadSettings) -> Result<Vec<Self>> {
        let _ = (config, path, settings);
        Err(ConfigError::unsupported_type::<Vec<Self>>())
    }
}

/// A leaf value that parses itself from a single configuration string.
///
/// Implement it together with `#[derive(Bind)]` and `#[config(loadable)]`:
///
/// ```
/// use confpath::{create_config_from_str, load_value, Bind, ConfigError, Loadable};
///
/// #[derive(Debug, Default, PartialEq, Bind)]
/// #[config(loadable)]
/// struct Ratio(u32, u32);
///
/// impl Loadable for Ratio {
///     fn load_from_config(data: &str) -> confpath::Result<Self> {
///         let (left, right) = data
///             .split_once(':')
///             .ok_or_else(|| ConfigError::invalid_value(data, "expected a:b"))?;
///         let parse = |part: &str| -> confpath::Result<u32> {
///             part.parse().map_err(|e| ConfigError::invalid_value(data, e))
///         };
///         Ok(Self(parse(left)?, parse(right)?))
///     }
/// }
///
/// # fn main() -> confpath::Result<()> {
/// let config = create_config_from_str("ratio=16:9", "ini")?;
/// let mut ratio = Ratio::default();
/// load_value(&config, "/ratio", &mut ratio)?;
/// assert_eq!(ratio, Ratio(16, 9));
/// # Ok(())
/// # }
/// ```
pub trait Loadable: Sized {
    /// Parses the value from its configuration text.
    fn load_from_config(data: &str) -> Result<Self>;
}

/// Binds a [`Loadable`] value from the string at `path`.
pub fn bind_loadable<T: Loadable>(target: &mut T, config: &Config, path: &str) -> Result<()> {
    *target = T::load_from_config(&config.get_string(path)?)?;
    Ok(())
}

/// Reads an array of [`Loadable`] values from the strings at `path`.
///
/// Stops at the first element that fails to load.
pub fn bind_loadable_slice<T: Loadable>(
    config: &Config,
    path: &str,
    settings: &LoadSettings,
) -> Result<Vec<T>> {
    config
        .get_strings(path, &settings.delim)?
        .iter()
        .map(|data| T::load_from_config(data))
        .collect()
}

type LoaderFn = dyn Fn(&str) -> Result<Box<dyn Any>> + Send + Sync;

/// Custom string loaders keyed by the type they produce.
///
/// A registered loader takes precedence over the type's own [`Bind`]
/// implementation, both for single values and for vector elements.
#[derive(Clone, Default)]
pub struct Loaders {
    loaders: HashMap<TypeId, Arc<LoaderFn>>,
}

impl Loaders {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the loader for `T`, replacing any previous one.
    pub fn register<T, F>(&mut self, loader: F)
    where
        T: 'static,
        F: Fn(&str) -> Result<T> + Send + Sync + 'static,
    {
        let erased = move |data: &str| loader(data).map(|value| Box::new(value) as Box<dyn Any>);
        self.loaders.insert(TypeId::of::<T>(), Arc::new(erased));
    }

    /// Returns `true` when a loader for `T` is registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.loaders.contains_key(&TypeId::of::<T>())
    }

    /// Returns the loader for `T`.
    pub fn find<T: 'static>(&self) -> Option<Loader<'_, T>> {
        self.loaders.get(&TypeId::of::<T>()).map(|inner| Loader {
            inner: inner.as_ref(),
            marker: PhantomData,
        })
    }

    /// Returns the number of registered loaders.
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Returns `true` when no loader is registered.
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl fmt::Debug for Loaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loaders")
            .field("count", &self.loaders.len())
            .finish()
    }
}

/// A registered loader producing `T`.
pub struct Loader<'a, T> {
    inner: &'a LoaderFn,
    marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Loader<'_, T> {
    /// Runs the loader on a configuration string.
    pub fn load(&self, data: &str) -> Result<T> {
        (self.inner)(data)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ConfigError::unsupported_type::<T>())
    }
}

/// Settings for a binding run.
///
/// # Example
///
/// ```
/// use confpath::LoadSettings;
///
/// let settings = LoadSettings::new()
///     .with_delimiter(",")
///     .ignoring_missing_fields(true)
///     .with_loader(|data: &str| Ok(data.to_uppercase()));
///
/// assert_eq!(settings.delim, ",");
/// assert!(settings.loaders.contains::<String>());
/// ```
#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Delimiter splitting text arrays into elements.
    pub delim: String,
    /// Swallow every binding failure and leave the target unchanged.
    pub ignore_errors: bool,
    /// Swallow only failures caused by absent values.
    pub ignore_missing: bool,
    /// Custom loaders by target type.
    pub loaders: Loaders,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadSettings {
    /// Strict settings with the default delimiter and no custom loaders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delim: DEFAULT_ARRAY_DELIMITER.to_string(),
            ignore_errors: false,
            ignore_missing: false,
            loaders: Loaders::new(),
        }
    }

    /// Default settings with the given error policy.
    #[must_use]
    pub fn default_for(ignore_errors: bool) -> Self {
        Self::new().ignoring_errors(ignore_errors)
    }

    /// Set the array delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delim: impl Into<String>) -> Self {
        self.delim = delim.into();
        self
    }

    /// Set whether every failure is swallowed.
    #[must_use]
    pub fn ignoring_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    /// Set whether absent values are swallowed.
    #[must_use]
    pub fn ignoring_missing_fields(mut self, ignore: bool) -> Self {
        self.ignore_missing = ignore;
        self
    }

    /// Register a custom loader for `T`.
    #[must_use]
    pub fn with_loader<T, F>(mut self, loader: F) -> Self
    where
        T: 'static,
        F: Fn(&str) -> Result<T> + Send + Sync + 'static,
    {
        self.loaders.register(loader);
        self
    }

    fn ignores(&self, error: &ConfigError) -> bool {
        self.ignore_errors || (self.ignore_missing && error.is_not_found())
    }
}

/// Binds the value at `path` into `target`, failing on the first error.
pub fn load_value<T: Bind>(config: &Config, path: &str, target: &mut T) -> Result<()> {
    tuned_load_value(config, &LoadSettings::default_for(false), path, target)
}

/// Binds the value at `path` into `target`, leaving every part that fails
/// unchanged.
pub fn load_value_ignoring_errors<T: Bind>(config: &Config, path: &str, target: &mut T) -> Result<()> {
    tuned_load_value(config, &LoadSettings::default_for(true), path, target)
}

/// Binds the value at `path` into `target`, leaving absent parts unchanged
/// and failing on any other error.
pub fn load_value_ignoring_missing_fields<T: Bind>(
    config: &Config,
    path: &str,
    target: &mut T,
) -> Result<()> {
    tuned_load_value(config, &LoadSettings::new().ignoring_missing_fields(true), path, target)
}

/// Binds the value at `path` into `target` with explicit settings.
pub fn tuned_load_value<T: Bind>(
    config: &Config,
    settings: &LoadSettings,
    path: &str,
    target: &mut T,
) -> Result<()> {
    bind_value(config, settings, path, target)
}

/// Binds one value and applies the error policy of `settings`.
///
/// Generated [`Bind`] implementations call this for every field.
pub fn bind_value<T: Bind>(
    config: &Config,
    settings: &LoadSettings,
    path: &str,
    target: &mut T,
) -> Result<()> {
    trace!(path, type_name = type_name::<T>(), "Binding configuration value");
    match load_single_value(config, settings, path, target) {
        Err(error) if settings.ignores(&error) => {
            debug!(path, %error, "Ignoring configuration error");
            Ok(())
        }
        result => result,
    }
}

fn load_single_value<T: Bind>(
    config: &Config,
    settings: &LoadSettings,
    path: &str,
    target: &mut T,
) -> Result<()> {
    if let Some(loader) = settings.loaders.find::<T>() {
        *target = loader.load(&config.get_string(path)?)?;
        return Ok(());
    }
    target.bind(config, path, settings)
}

fn narrow<T: TryFrom<i64>>(value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| ConfigError::incorrect_value_type(type_name::<T>()))
}

macro_rules! bind_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Bind for $ty {
            fn bind(&mut self, config: &Config, path: &str, _settings: &LoadSettings) -> Result<()> {
                *self = narrow(config.get_int(path)?)?;
                Ok(())
            }

            fn bind_slice(config: &Config, path: &str, settings: &LoadSettings) -> Result<Vec<Self>> {
                config.get_ints(path, &settings.delim)?.into_iter().map(narrow).collect()
            }
        }
    )*};
}

bind_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Bind for bool {
    fn bind(&mut self, config: &Config, path: &str, _settings: &LoadSettings) -> Result<()> {
        *self = config.get_bool(path)?;
        Ok(())
    }

    fn bind_slice(config: &Config, path: &str, settings: &LoadSettings) -> Result<Vec<Self>> {
        config.get_bools(path, &settings.delim)
    }
}

impl Bind for f64 {
    fn bind(&mut self, config: &Config, path: &str, _settings: &LoadSettings) -> Result<()> {
        *self = config.get_float(path)?;
        Ok(())
    }

    fn bind_slice(config: &Config, path: &str, settings: &LoadSettings) -> Result<Vec<Self>> {
        config.get_floats(path, &settings.delim)
    }
}

impl Bind for f32 {
    fn bind(&mut self, config: &Config, path: &str, _settings: &LoadSettings) -> Result<()> {
        *self = config.get_float(path)? as f32;
        Ok(())
    }

    fn bind_slice(config: &Config, path: &str, settings: &LoadSettings) -> Result<Vec<Self>> {
        let values = config.get_floats(path, &settings.delim)?;
        Ok(values.into_iter().map(|value| value as f32).collect())
    }
}

impl Bind for String {
    fn bind(&mut self, config: &Config, path: &str, _settings: &LoadSettings) -> Result<()> {
        *self = config.get_string(path)?;
        Ok(())
    }

    fn bind_slice(config: &Config, path: &str, settings: &LoadSettings) -> Result<Vec<Self>> {
        config.get_strings(path, &settings.delim)
    }
}

impl<T: Bind> Bind for Vec<T> {
    fn bind(&mut self, config: &Config, path: &str, settings: &LoadSettings) -> Result<()> {
        *self = match settings.loaders.find::<T>() {
            Some(loader) => config
                .get_strings(path, &settings.delim)?
                .iter()
                .map(|data| loader.load(data))
                .collect::<Result<_>>()?,
            None => T::bind_slice(config, path, settings)?,
        };
        Ok(())
    }
}

impl<T: Bind + Default> Bind for Option<T> {
    fn bind(&mut self, config: &Config, path: &str, settings: &LoadSettings) -> Result<()> {
        match self {
            Some(value) => load_single_value(config, settings, path, value),
            None => {
                let mut value = T::default();
                load_single_value(config, settings, path, &mut value)?;
                *self = Some(value);
                Ok(())
            }
        }
    }
}

macro_rules! bind_via_loadable {
    ($($ty:ty),* $(,)?) => {$(
        impl Bind for $ty {
            fn bind(&mut self, config: &Config, path: &str, _settings: &LoadSettings) -> Result<()> {
                bind_loadable(self, config, path)
            }

            fn bind_slice(config: &Config, path: &str, settings: &LoadSettings) -> Result<Vec<Self>> {
                bind_loadable_slice(config, path, settings)
            }
        }
    )*};
}

bind_via_loadable!(Duration, DateTime<FixedOffset>, DateTime<Utc>, PathBuf, IpAddr, SocketAddr);

impl Loadable for Duration {
    fn load_from_config(data: &str) -> Result<Self> {
        Ok(humantime::parse_duration(data)?)
    }
}

impl Loadable for DateTime<FixedOffset> {
    fn load_from_config(data: &str) -> Result<Self> {
        Ok(DateTime::parse_from_rfc3339(data)?)
    }
}

impl Loadable for DateTime<Utc> {
    fn load_from_config(data: &str) -> Result<Self> {
        Ok(DateTime::parse_from_rfc3339(data)?.with_timezone(&Utc))
    }
}

impl Loadable for PathBuf {
    fn load_from_config(data: &str) -> Result<Self> {
        Ok(Self::from(data))
    }
}

impl Loadable for IpAddr {
    fn load_from_config(data: &str) -> Result<Self> {
        data.parse().map_err(|e| ConfigError::invalid_value(data, e))
    }
}

impl Loadable for SocketAddr {
    fn load_from_config(data: &str) -> Result<Self> {
        data.parse().map_err(|e| ConfigError::invalid_value(data, e))
    }
}
