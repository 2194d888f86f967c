//! Raw values and the coercion rules shared by all accessors.
//!
//! Text-backed formats (INI, XML) hand out strings that are parsed with the
//! standard Rust grammars. Tree formats (JSON, YAML) hand out decoded nodes,
//! which must already have the requested kind; the only conversion allowed is
//! narrowing an integral float to an integer.

use crate::error::{ConfigError, Result};
use crate::tree::TreeNode;

/// A value found at some path, in the shape its format stores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Text from an INI key or an XML element/attribute.
    Text(&'a str),
    /// A decoded JSON node.
    Json(&'a serde_json::Value),
    /// A decoded YAML node.
    Yaml(&'a serde_yaml::Value),
}

impl<'a> RawValue<'a> {
    /// Returns the text when the value comes from a text-backed format.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Coerces the value into a string.
    pub fn as_string(&self) -> Result<String> {
        match self {
            Self::Text(text) => Ok((*text).to_string()),
            Self::Json(node) => tree_string(*node),
            Self::Yaml(node) => tree_string(*node),
        }
    }

    /// Coerces the value into a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Text(text) => parse_bool(text),
            Self::Json(node) => tree_bool(*node),
            Self::Yaml(node) => tree_bool(*node),
        }
    }

    /// Coerces the value into a float.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Self::Text(text) => parse_float(text),
            Self::Json(node) => tree_float(*node),
            Self::Yaml(node) => tree_float(*node),
        }
    }

    /// Coerces the value into an integer.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Self::Text(text) => parse_int(text),
            Self::Json(node) => tree_int(*node),
            Self::Yaml(node) => tree_int(*node),
        }
    }
}

/// Parses a boolean written as `true` or `false`.
pub fn parse_bool(data: &str) -> Result<bool> {
    data.parse()
        .map_err(|_| ConfigError::incorrect_value_type("bool"))
}

/// Parses a decimal float.
pub fn parse_float(data: &str) -> Result<f64> {
    data.parse()
        .map_err(|_| ConfigError::incorrect_value_type("float"))
}

/// Parses a base-10 signed integer.
pub fn parse_int(data: &str) -> Result<i64> {
    data.parse()
        .map_err(|_| ConfigError::incorrect_value_type("int"))
}

/// Splits delimited text into array elements.
///
/// Empty text is an empty array. An empty delimiter splits into characters.
pub fn split_values<'a>(data: &'a str, delim: &str) -> Vec<&'a str> {
    if data.is_empty() {
        return Vec::new();
    }
    if delim.is_empty() {
        return data
            .char_indices()
            .map(|(start, ch)| &data[start..start + ch.len_utf8()])
            .collect();
    }
    data.split(delim).collect()
}

fn tree_string<N: TreeNode>(node: &N) -> Result<String> {
    node.as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::incorrect_value_type("string"))
}

fn tree_bool<N: TreeNode>(node: &N) -> Result<bool> {
    node.as_bool()
        .ok_or_else(|| ConfigError::incorrect_value_type("bool"))
}

fn tree_float<N: TreeNode>(node: &N) -> Result<f64> {
    node.as_f64()
        .ok_or_else(|| ConfigError::incorrect_value_type("float"))
}

fn tree_int<N: TreeNode>(node: &N) -> Result<i64> {
    if let Some(value) = node.as_i64() {
        return Ok(value);
    }
    match node.as_f64() {
        Some(value) if is_integral(value) && fits_i64(value) => Ok(value as i64),
        _ => Err(ConfigError::incorrect_value_type("int")),
    }
}

// The fractional part must be smaller than the smallest positive float.
fn is_integral(value: f64) -> bool {
    (value.trunc() - value).abs() < f64::from_bits(1)
}

fn fits_i64(value: f64) -> bool {
    // 2^63 is exactly representable, i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (-LIMIT..LIMIT).contains(&value)
}
