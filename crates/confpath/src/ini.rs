//! Accessor over flat `[section]` / `key = value` documents.
//!
//! Positions are the whole document, a section, or a key inside a section.
//! A document without named sections exposes its keys directly at the root,
//! otherwise the first path segment names the section.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::accessor::{Config, ConfigAccessor, ValueGrabber, ValueSliceCreator};
use crate::error::{ConfigError, Result};
use crate::path::split_path;
use crate::value::{split_values, RawValue};

/// Name of the implicit section holding keys declared before any header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

const FORMAT: &str = "ini";

/// A parsed INI document.
///
/// Sections and keys keep their declaration order. The [`DEFAULT_SECTION`]
/// always exists and comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniDocument {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl Default for IniDocument {
    fn default() -> Self {
        let mut sections = IndexMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), IndexMap::new());
        Self { sections }
    }
}

impl IniDocument {
    /// Parses a document.
    ///
    /// Blank lines and lines starting with `;` or `#` are ignored. Values may
    /// be wrapped in matching single or double quotes. A repeated key keeps
    /// its last value.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut document = Self::default();
        let mut current = DEFAULT_SECTION.to_string();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| malformed(index, "invalid section header"))?;
                current = name.to_string();
                document.sections.entry(current.clone()).or_default();
                continue;
            }

            let split = line
                .find(|c| c == '=' || c == ':')
                .ok_or_else(|| malformed(index, "expected '=' or ':'"))?;
            let key = line[..split].trim();
            if key.is_empty() {
                return Err(malformed(index, "empty key"));
            }
            let value = unquote(line[split + 1..].trim());

            document
                .sections
                .entry(current.clone())
                .or_default()
                .insert(key.to_string(), value.to_string());
        }

        Ok(document)
    }

    /// Returns the keys of a section.
    pub fn section(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(name)
    }

    /// Returns the section names in declaration order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    fn has_named_sections(&self) -> bool {
        self.sections.len() > 1
    }
}

fn malformed(index: usize, message: &str) -> ConfigError {
    ConfigError::parse(FORMAT, format!("line {}: {}", index + 1, message))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Accessor positioned at the root, a section, or a key of a shared document.
#[derive(Debug, Clone, PartialEq)]
pub struct IniConfig {
    document: Arc<IniDocument>,
    section: Option<String>,
    key: Option<String>,
}

struct Position<'a> {
    section: Option<&'a str>,
    key: Option<&'a str>,
}

impl IniConfig {
    /// Creates an accessor positioned at the document root.
    pub fn new(document: IniDocument) -> Self {
        Self {
            document: Arc::new(document),
            section: None,
            key: None,
        }
    }

    /// Parses a document and positions the accessor at its root.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| ConfigError::parse(FORMAT, e.to_string()))?;
        let document = IniDocument::parse(text)?;
        debug!(
            format = FORMAT,
            bytes = data.len(),
            sections = document.sections.len(),
            "Parsed configuration document"
        );
        Ok(Self::new(document))
    }

    /// Returns the shared document.
    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    fn locate<'a>(&'a self, path: &'a str) -> Result<Position<'a>> {
        let mut parts = split_path(path).into_iter();

        let section = match self.section.as_deref() {
            Some(section) => Some(section),
            None if self.document.has_named_sections() => parts.next(),
            None if !parts.as_slice().is_empty() => Some(DEFAULT_SECTION),
            None => None,
        };
        if let Some(section) = section {
            if self.document.section(section).is_none() {
                return Err(ConfigError::not_found(path));
            }
        }

        let key = match self.key.as_deref() {
            Some(key) => Some(key),
            None if section.is_some() => parts.next(),
            None => None,
        };

        if parts.next().is_some() {
            return Err(ConfigError::not_found(path));
        }
        Ok(Position { section, key })
    }

    fn value(&self, path: &str) -> Result<&str> {
        let position = self.locate(path)?;
        position
            .section
            .zip(position.key)
            .and_then(|(section, key)| self.document.section(section)?.get(key))
            .map(String::as_str)
            .ok_or_else(|| ConfigError::not_found(path))
    }
}

impl ConfigAccessor for IniConfig {
    fn grab_value(&self, path: &str, grabber: &mut ValueGrabber<'_>) -> Result<()> {
        grabber(RawValue::Text(self.value(path)?))
    }

    fn grab_values(
        &self,
        path: &str,
        delim: &str,
        creator: &mut ValueSliceCreator<'_>,
        grabber: &mut ValueGrabber<'_>,
    ) -> Result<()> {
        let items = split_values(self.value(path)?, delim);
        creator(items.len());
        for item in items {
            grabber(RawValue::Text(item))?;
        }
        Ok(())
    }

    fn get_config_part(&self, path: &str) -> Result<Config> {
        let position = self.locate(path)?;
        if position.key.is_some() && self.key.is_none() {
            self.value(path)?;
        }
        Ok(Config::Ini(Self {
            document: Arc::clone(&self.document),
            section: position.section.map(str::to_string),
            key: position.key.map(str::to_string),
        }))
    }
}
