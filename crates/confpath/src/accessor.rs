//! The uniform accessor interface and the [`Config`] sum type.
//!
//! Every format implements [`ConfigAccessor`] through three primitives:
//! [`grab_value`](ConfigAccessor::grab_value),
//! [`grab_values`](ConfigAccessor::grab_values) and
//! [`get_config_part`](ConfigAccessor::get_config_part). The typed getters are
//! provided on top of them using the coercion rules of [`RawValue`].

use crate::error::{ConfigError, Result};
use crate::ini::IniConfig;
use crate::loader::ConfigType;
use crate::tree::TreeConfig;
use crate::value::RawValue;
use crate::xml::XmlConfig;

/// Visitor receiving a raw value found by an accessor.
pub type ValueGrabber<'g> = dyn FnMut(RawValue<'_>) -> Result<()> + 'g;

/// Callback receiving the number of array elements before they are visited.
pub type ValueSliceCreator<'g> = dyn FnMut(usize) + 'g;

/// Read access to a configuration document at some position.
///
/// # Example
///
/// ```
/// use confpath::{create_config_from_str, ConfigAccessor};
///
/// # fn main() -> confpath::Result<()> {
/// let config = create_config_from_str(r#"{"server": {"port": 8080}}"#, "json")?;
/// assert_eq!(config.get_int("/server/port")?, 8080);
///
/// let server = config.get_config_part("server")?;
/// assert_eq!(server.get_int("port")?, 8080);
/// # Ok(())
/// # }
/// ```
pub trait ConfigAccessor {
    /// Resolves `path` and hands the raw value to `grabber`.
    ///
    /// The grabber is not called when the path does not resolve; its error is
    /// returned unchanged.
    fn grab_value(&self, path: &str, grabber: &mut ValueGrabber<'_>) -> Result<()>;

    /// Resolves `path` to an array and hands every element to `grabber`.
    ///
    /// Text formats split the value with `delim`; tree formats require an array
    /// node. `creator` receives the element count first. Visiting stops at the
    /// first grabber error.
    fn grab_values(
        &self,
        path: &str,
        delim: &str,
        creator: &mut ValueSliceCreator<'_>,
        grabber: &mut ValueGrabber<'_>,
    ) -> Result<()>;

    /// Returns an accessor rooted at `path`.
    fn get_config_part(&self, path: &str) -> Result<Config>;

    /// Returns the string at `path`.
    fn get_string(&self, path: &str) -> Result<String> {
        grab_one(self, path, |raw| raw.as_string())
    }

    /// Returns the boolean at `path`.
    fn get_bool(&self, path: &str) -> Result<bool> {
        grab_one(self, path, |raw| raw.as_bool())
    }

    /// Returns the float at `path`.
    fn get_float(&self, path: &str) -> Result<f64> {
        grab_one(self, path, |raw| raw.as_float())
    }

    /// Returns the integer at `path`.
    fn get_int(&self, path: &str) -> Result<i64> {
        grab_one(self, path, |raw| raw.as_int())
    }

    /// Returns the strings at `path`.
    fn get_strings(&self, path: &str, delim: &str) -> Result<Vec<String>> {
        grab_many(self, path, delim, |raw| raw.as_string())
    }

    /// Returns the booleans at `path`.
    fn get_bools(&self, path: &str, delim: &str) -> Result<Vec<bool>> {
        grab_many(self, path, delim, |raw| raw.as_bool())
    }

    /// Returns the floats at `path`.
    fn get_floats(&self, path: &str, delim: &str) -> Result<Vec<f64>> {
        grab_many(self, path, delim, |raw| raw.as_float())
    }

    /// Returns the integers at `path`.
    fn get_ints(&self, path: &str, delim: &str) -> Result<Vec<i64>> {
        grab_many(self, path, delim, |raw| raw.as_int())
    }
}

fn grab_one<A, T, F>(accessor: &A, path: &str, parse: F) -> Result<T>
where
    A: ConfigAccessor + ?Sized,
    F: Fn(&RawValue<'_>) -> Result<T>,
{
    let mut value = None;
    accessor.grab_value(path, &mut |raw| {
        value = Some(parse(&raw)?);
        Ok(())
    })?;
    value.ok_or_else(|| ConfigError::not_found(path))
}

fn grab_many<A, T, F>(
    accessor: &A,
    path: &str,
    delim: &str,
    parse: F,
) -> Result<Vec<T>>
where
    A: ConfigAccessor + ?Sized,
    F: Fn(&RawValue<'_>) -> Result<T>,
{
    let mut values = Vec::new();
    let mut creator = |len: usize| values.reserve_exact(len);
    let mut parsed = Vec::new();
    accessor.grab_values(path, delim, &mut creator, &mut |raw| {
        parsed.push(parse(&raw)?);
        Ok(())
    })?;
    values.append(&mut parsed);
    Ok(values)
}

/// A parsed configuration document viewed at some position.
///
/// Values are cheap to clone: the parsed document is shared, only the position
/// is copied. Navigating with [`get_config_part`](ConfigAccessor::get_config_part)
/// returns a new `Config` and never changes the receiver.
#[derive(Debug, Clone, PartialEq)]
pub enum Config {
    /// Flat `[section]` / `key = value` document.
    Ini(IniConfig),
    /// JSON tree.
    Json(TreeConfig<serde_json::Value>),
    /// YAML tree.
    Yaml(TreeConfig<serde_yaml::Value>),
    /// XML element tree.
    Xml(XmlConfig),
}

impl Config {
    /// Returns the format of the underlying document.
    pub fn config_type(&self) -> ConfigType {
        match self {
            Self::Ini(_) => ConfigType::Ini,
            Self::Json(_) => ConfigType::Json,
            Self::Yaml(_) => ConfigType::Yaml,
            Self::Xml(_) => ConfigType::Xml,
        }
    }

    fn accessor(&self) -> &dyn ConfigAccessor {
        match self {
            Self::Ini(config) => config,
            Self::Json(config) => config,
            Self::Yaml(config) => config,
            Self::Xml(config) => config,
        }
    }
}

impl ConfigAccessor for Config {
    fn grab_value(&self, path: &str, grabber: &mut ValueGrabber<'_>) -> Result<()> {
        self.accessor().grab_value(path, grabber)
    }

    fn grab_values(
        &self,
        path: &str,
        delim: &str,
        creator: &mut ValueSliceCreator<'_>,
        grabber: &mut ValueGrabber<'_>,
    ) -> Result<()> {
        self.accessor().grab_values(path, delim, creator, grabber)
    }

    fn get_config_part(&self, path: &str) -> Result<Config> {
        self.accessor().get_config_part(path)
    }
}

impl From<IniConfig> for Config {
    fn from(config: IniConfig) -> Self {
        Self::Ini(config)
    }
}

impl From<TreeConfig<serde_json::Value>> for Config {
    fn from(config: TreeConfig<serde_json::Value>) -> Self {
        Self::Json(config)
    }
}

impl From<TreeConfig<serde_yaml::Value>> for Config {
    fn from(config: TreeConfig<serde_yaml::Value>) -> Self {
        Self::Yaml(config)
    }
}

impl From<XmlConfig> for Config {
    fn from(config: XmlConfig) -> Self {
        Self::Xml(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::create_config_from_str;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_config_is_send_and_sync() {
        assert_send_sync::<Config>();
    }

    #[test]
    fn test_config_type() {
        let config = create_config_from_str("{}", "json").unwrap();
        assert_eq!(config.config_type(), ConfigType::Json);

        let config = create_config_from_str("", "conf").unwrap();
        assert_eq!(config.config_type(), ConfigType::Ini);
    }

    #[test]
    fn test_grab_value_skips_grabber_when_absent() {
        let config = create_config_from_str(r#"{"element": 1}"#, "json").unwrap();
        let mut executed = false;
        let err = config
            .grab_value("/absent", &mut |_| {
                executed = true;
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!executed);
    }

    #[test]
    fn test_grab_values_reports_length_first() {
        let config = create_config_from_str("<xml><ints>1 2 3</ints></xml>", "xml").unwrap();
        let mut length = None;
        let mut seen = Vec::new();
        config
            .grab_values(
                "/xml/ints",
                " ",
                &mut |len| length = Some(len),
                &mut |raw| {
                    seen.push(raw.as_int()?);
                    Ok(())
                },
            )
            .unwrap();
        assert_eq!(length, Some(3));
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_grab_value_passes_grabber_error() {
        let config = create_config_from_str("element=1", "ini").unwrap();
        let err = config
            .grab_value("/element", &mut |_| {
                Err(ConfigError::invalid_value("1", "rejected"))
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_provided_getters_through_trait_object() {
        let config = create_config_from_str(
            r#"{"s": "text", "b": true, "f": 1.5, "i": 7,
                "ss": ["a", "b"], "bs": [true, false], "fs": [0.5, 2], "is": [1, 2.0]}"#,
            "json",
        )
        .unwrap();
        let accessor: &dyn ConfigAccessor = &config;

        assert_eq!(accessor.get_string("/s").unwrap(), "text");
        assert!(accessor.get_bool("/b").unwrap());
        assert!((accessor.get_float("/f").unwrap() - 1.5).abs() < f64::EPSILON);
        assert_eq!(accessor.get_int("/i").unwrap(), 7);
        assert_eq!(accessor.get_strings("/ss", " ").unwrap(), vec!["a", "b"]);
        assert_eq!(accessor.get_bools("/bs", " ").unwrap(), vec![true, false]);
        assert_eq!(accessor.get_floats("/fs", " ").unwrap(), vec![0.5, 2.0]);
        assert_eq!(accessor.get_ints("/is", " ").unwrap(), vec![1, 2]);
    }
}
