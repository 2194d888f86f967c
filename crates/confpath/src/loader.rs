//! Format dispatch and document entry points.
//!
//! Documents are created from bytes, strings, readers or files. The format is
//! named explicitly (`"json"`, `"ini"`, ...) or taken from a file extension.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::accessor::Config;
use crate::error::{ConfigError, Result};
use crate::ini::IniConfig;
use crate::tree::TreeConfig;
use crate::xml::XmlConfig;

/// Type name of INI documents.
pub const CONF: &str = "conf";
/// Alternative type name of INI documents.
pub const INI: &str = "ini";
/// Type name of JSON documents.
pub const JSON: &str = "json";
/// Type name of XML documents.
pub const XML: &str = "xml";
/// Type name of YAML documents.
pub const YAML: &str = "yaml";
/// Alternative type name of YAML documents.
pub const YML: &str = "yml";

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigType {
    /// `[section]` / `key = value` documents (`conf`, `ini`).
    Ini,
    /// JSON documents (`json`).
    Json,
    /// XML documents (`xml`).
    Xml,
    /// YAML documents (`yaml`, `yml`).
    Yaml,
}

impl ConfigType {
    /// Returns the canonical type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ini => INI,
            Self::Json => JSON,
            Self::Xml => XML,
            Self::Yaml => YAML,
        }
    }

    /// Parses a document of this format.
    pub fn parse(self, data: &[u8]) -> Result<Config> {
        Ok(match self {
            Self::Ini => Config::Ini(IniConfig::parse(data)?),
            Self::Json => Config::Json(TreeConfig::parse(data)?),
            Self::Xml => Config::Xml(XmlConfig::parse(data)?),
            Self::Yaml => Config::Yaml(TreeConfig::parse(data)?),
        })
    }
}

impl FromStr for ConfigType {
    type Err = ConfigError;

    /// Matches type names case-sensitively.
    fn from_str(name: &str) -> Result<Self> {
        match name {
            CONF | INI => Ok(Self::Ini),
            JSON => Ok(Self::Json),
            XML => Ok(Self::Xml),
            YAML | YML => Ok(Self::Yaml),
            _ => Err(ConfigError::unknown_config_type(name)),
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a document of the named type.
///
/// # Example
///
/// ```
/// use confpath::{create_config, ConfigAccessor};
///
/// # fn main() -> confpath::Result<()> {
/// let config = create_config(b"[server]\nport = 8080\n", "ini")?;
/// assert_eq!(config.get_int("/server/port")?, 8080);
///
/// assert!(create_config(b"{}", "toml").is_err());
/// # Ok(())
/// # }
/// ```
pub fn create_config(data: &[u8], config_type: &str) -> Result<Config> {
    config_type.parse::<ConfigType>()?.parse(data)
}

/// Parses a string document of the named type.
pub fn create_config_from_str(data: &str, config_type: &str) -> Result<Config> {
    create_config(data.as_bytes(), config_type)
}

/// Parses a document whose type comes from a file name or a bare extension.
///
/// `"app.yml"`, `"/etc/app.yml"` and `"yml"` all select YAML.
pub fn parse_by_extension(data: &[u8], name: &str) -> Result<Config> {
    if name.contains('.') || name.contains('/') {
        create_config(data, config_type_of(name))
    } else {
        create_config(data, name)
    }
}

/// Returns the extension of the last path element without its dot, or `""`.
///
/// # Example
///
/// ```
/// use confpath::config_type_of;
///
/// assert_eq!(config_type_of("/etc/app/config.json"), "json");
/// assert_eq!(config_type_of("archive.tar.gz"), "gz");
/// assert_eq!(config_type_of("/etc/app.d/config"), "");
/// ```
#[must_use]
pub fn config_type_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.').map_or("", |dot| &name[dot + 1..])
}

/// Reads and parses a file; the type comes from its extension.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    read_typed_config(path, config_type_of(&name))
}

/// Reads and parses a file of the named type.
///
/// # Errors
///
/// Returns [`ConfigError::IncorrectPath`] for an empty path, and
/// [`ConfigError::Io`] when the file cannot be read.
pub fn read_typed_config<P: AsRef<Path>>(path: P, config_type: &str) -> Result<Config> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ConfigError::incorrect_path(""));
    }
    read_config_from_reader(File::open(path)?, config_type)
}

/// Reads a whole document from `reader` and parses it as the named type.
pub fn read_config_from_reader<R: Read>(mut reader: R, config_type: &str) -> Result<Config> {
    let config_type = config_type.parse::<ConfigType>()?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    config_type.parse(&data)
}
