//! Accessor over dynamically typed trees (JSON and YAML).

use std::fmt::Debug;
use std::sync::Arc;

use tracing::debug;

use crate::accessor::{Config, ConfigAccessor, ValueGrabber, ValueSliceCreator};
use crate::error::{ConfigError, Result};
use crate::path::split_path;
use crate::value::RawValue;

/// A node of a decoded tree document.
///
/// Implemented for [`serde_json::Value`] and [`serde_yaml::Value`]. Only
/// string-keyed mappings are navigable.
pub trait TreeNode: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Short format name used in diagnostics.
    const FORMAT: &'static str;

    /// Decodes a whole document.
    fn parse(data: &[u8]) -> Result<Self>;

    /// Returns the child stored under `key` when the node is a mapping.
    fn child(&self, key: &str) -> Option<&Self>;

    /// Returns the elements when the node is an array.
    fn elements(&self) -> Option<&[Self]>;

    /// Returns the string when the node is a string.
    fn as_str(&self) -> Option<&str>;

    /// Returns the boolean when the node is a boolean.
    fn as_bool(&self) -> Option<bool>;

    /// Returns the integer when the node is an integer in `i64` range.
    fn as_i64(&self) -> Option<i64>;

    /// Returns the number as a float when the node is any number.
    fn as_f64(&self) -> Option<f64>;

    /// Wraps the node for the coercion rules.
    fn raw(&self) -> RawValue<'_>;

    /// Wraps an accessor over this node type into a [`Config`].
    fn into_config(config: TreeConfig<Self>) -> Config;
}

impl TreeNode for serde_json::Value {
    const FORMAT: &'static str = "json";

    fn parse(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    fn elements(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    fn raw(&self) -> RawValue<'_> {
        RawValue::Json(self)
    }

    fn into_config(config: TreeConfig<Self>) -> Config {
        Config::Json(config)
    }
}

impl TreeNode for serde_yaml::Value {
    const FORMAT: &'static str = "yaml";

    fn parse(data: &[u8]) -> Result<Self> {
        // An empty document is a null root.
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::Null);
        }
        Ok(serde_yaml::from_slice(data)?)
    }

    fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    fn elements(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    fn raw(&self) -> RawValue<'_> {
        RawValue::Yaml(self)
    }

    fn into_config(config: TreeConfig<Self>) -> Config {
        Config::Yaml(config)
    }
}

/// Accessor positioned at a node of a shared JSON or YAML document.
#[derive(Debug, Clone)]
pub struct TreeConfig<N: TreeNode> {
    root: Arc<N>,
    base: Vec<String>,
}

impl<N: TreeNode> TreeConfig<N> {
    /// Creates an accessor positioned at the document root.
    pub fn new(root: N) -> Self {
        Self {
            root: Arc::new(root),
            base: Vec::new(),
        }
    }

    /// Decodes a document and positions the accessor at its root.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let root = N::parse(data)?;
        debug!(format = N::FORMAT, bytes = data.len(), "Parsed configuration document");
        Ok(Self::new(root))
    }

    /// Returns the node the accessor is positioned at.
    pub fn node(&self) -> Option<&N> {
        self.find("")
    }

    fn find(&self, path: &str) -> Option<&N> {
        let mut node = self.root.as_ref();
        for segment in self.base.iter().map(String::as_str).chain(split_path(path)) {
            node = node.child(segment)?;
        }
        Some(node)
    }

    fn resolve(&self, path: &str) -> Result<&N> {
        self.find(path).ok_or_else(|| ConfigError::not_found(path))
    }
}

impl<N: TreeNode> PartialEq for TreeConfig<N> {
    fn eq(&self, other: &Self) -> bool {
        self.node() == other.node()
    }
}

impl<N: TreeNode> ConfigAccessor for TreeConfig<N> {
    fn grab_value(&self, path: &str, grabber: &mut ValueGrabber<'_>) -> Result<()> {
        grabber(self.resolve(path)?.raw())
    }

    fn grab_values(
        &self,
        path: &str,
        _delim: &str,
        creator: &mut ValueSliceCreator<'_>,
        grabber: &mut ValueGrabber<'_>,
    ) -> Result<()> {
        let items = self
            .resolve(path)?
            .elements()
            .ok_or_else(|| ConfigError::incorrect_value_type("array"))?;
        creator(items.len());
        for item in items {
            grabber(item.raw())?;
        }
        Ok(())
    }

    fn get_config_part(&self, path: &str) -> Result<Config> {
        self.resolve(path)?;
        let mut base = self.base.clone();
        base.extend(split_path(path).into_iter().map(str::to_string));
        Ok(N::into_config(Self {
            root: Arc::clone(&self.root),
            base,
        }))
    }
}
