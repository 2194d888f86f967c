//! Accessor over XML documents.
//!
//! The document is reduced to a tree of [`XmlElement`]s holding attributes,
//! trimmed text and children grouped by tag name. Paths walk child elements
//! by local name; a final `@name` segment reads an attribute of the element
//! reached so far. Only the first of several same-named siblings is
//! addressable.

use std::collections::HashMap;
use std::sync::Arc;

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::accessor::{Config, ConfigAccessor, ValueGrabber, ValueSliceCreator};
use crate::error::{ConfigError, Result};
use crate::path::{attribute_name, split_path};
use crate::value::{split_values, RawValue};

const FORMAT: &str = "xml";

/// One element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    attributes: HashMap<String, String>,
    value: String,
    children: HashMap<String, Vec<XmlElement>>,
}

impl XmlElement {
    /// Returns an attribute by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the trimmed text content.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the first child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.get(name).and_then(|children| children.first())
    }

    /// Returns every child with the given local name, in document order.
    pub fn children(&self, name: &str) -> &[XmlElement] {
        self.children.get(name).map_or(&[], Vec::as_slice)
    }

    /// Parses a document into a synthetic root whose children are the
    /// document's top-level elements.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(data);
        let mut stack = vec![(String::new(), XmlElement::default())];
        let mut text = String::new();

        loop {
            match reader.read_event().map_err(parse_error)? {
                Event::Start(start) => {
                    flush_text(&mut stack, &mut text);
                    stack.push(open_element(&start)?);
                }
                Event::Empty(start) => {
                    flush_text(&mut stack, &mut text);
                    let (name, element) = open_element(&start)?;
                    attach(&mut stack, name, element)?;
                }
                Event::End(_) => {
                    flush_text(&mut stack, &mut text);
                    let (name, element) = stack
                        .pop()
                        .filter(|_| !stack.is_empty())
                        .ok_or_else(|| ConfigError::parse(FORMAT, "unexpected closing tag"))?;
                    attach(&mut stack, name, element)?;
                }
                Event::Text(chunk) => {
                    let chunk = utf8(&chunk)?;
                    text.push_str(&unescape(chunk).map_err(parse_error)?);
                }
                Event::CData(chunk) => text.push_str(utf8(&chunk)?),
                Event::GeneralRef(reference) => text.push_str(&resolve_reference(utf8(&reference)?)?),
                Event::Eof => break,
                _ => {}
            }
        }

        flush_text(&mut stack, &mut text);
        match (stack.pop(), stack.is_empty()) {
            (Some((_, root)), true) => Ok(root),
            _ => Err(ConfigError::parse(FORMAT, "unclosed element at end of document")),
        }
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<(String, XmlElement)> {
    let name = utf8(start.local_name().as_ref())?.to_string();
    let mut element = XmlElement::default();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(parse_error)?;
        let key = utf8(attribute.key.local_name().as_ref())?.to_string();
        let value = unescape(utf8(&attribute.value)?).map_err(parse_error)?;
        element.attributes.insert(key, value.into_owned());
    }
    Ok((name, element))
}

fn attach(stack: &mut [(String, XmlElement)], name: String, element: XmlElement) -> Result<()> {
    let (_, parent) = stack
        .last_mut()
        .ok_or_else(|| ConfigError::parse(FORMAT, "element outside of document"))?;
    parent.children.entry(name).or_default().push(element);
    Ok(())
}

// Text between tags is collected across chunks and references; the last
// non-blank run wins.
fn flush_text(stack: &mut [(String, XmlElement)], text: &mut String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        if let Some((_, element)) = stack.last_mut() {
            element.value = trimmed.to_string();
        }
    }
    text.clear();
}

fn resolve_reference(name: &str) -> Result<String> {
    let resolved = match name.strip_prefix('#') {
        Some(code) => {
            let code = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => code.parse(),
            };
            code.ok().and_then(char::from_u32).map(String::from)
        }
        None => resolve_predefined_entity(name).map(str::to_string),
    };
    resolved.ok_or_else(|| ConfigError::parse(FORMAT, format!("unknown reference &{};", name)))
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(parse_error)
}

fn parse_error(error: impl ToString) -> ConfigError {
    ConfigError::parse(FORMAT, error.to_string())
}

/// Accessor positioned at an element of a shared XML document.
#[derive(Debug, Clone)]
pub struct XmlConfig {
    root: Arc<XmlElement>,
    base: Vec<String>,
}

enum Found<'a> {
    Element(&'a XmlElement),
    Attribute(&'a str),
}

impl XmlConfig {
    /// Creates an accessor positioned at the synthetic document root.
    pub fn new(root: XmlElement) -> Self {
        Self {
            root: Arc::new(root),
            base: Vec::new(),
        }
    }

    /// Parses a document and positions the accessor at its synthetic root.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let root = XmlElement::parse(data)?;
        debug!(format = FORMAT, bytes = data.len(), "Parsed configuration document");
        Ok(Self::new(root))
    }

    /// Returns the element the accessor is positioned at.
    pub fn element(&self) -> Option<&XmlElement> {
        self.walk(&self.base)
    }

    fn walk<S: AsRef<str>>(&self, segments: &[S]) -> Option<&XmlElement> {
        segments
            .iter()
            .try_fold(self.root.as_ref(), |element, segment| element.child(segment.as_ref()))
    }

    fn find(&self, path: &str) -> Option<Found<'_>> {
        let mut element = self.element()?;
        let segments = split_path(path);
        for (index, segment) in segments.iter().enumerate() {
            if let Some(name) = attribute_name(segment) {
                if index + 1 != segments.len() {
                    return None;
                }
                return element.attribute(name).map(Found::Attribute);
            }
            element = element.child(segment)?;
        }
        Some(Found::Element(element))
    }

    fn text(&self, path: &str) -> Result<&str> {
        match self.find(path) {
            Some(Found::Element(element)) => Ok(element.value()),
            Some(Found::Attribute(value)) => Ok(value),
            None => Err(ConfigError::not_found(path)),
        }
    }
}

impl PartialEq for XmlConfig {
    fn eq(&self, other: &Self) -> bool {
        self.element() == other.element()
    }
}

impl ConfigAccessor for XmlConfig {
    fn grab_value(&self, path: &str, grabber: &mut ValueGrabber<'_>) -> Result<()> {
        grabber(RawValue::Text(self.text(path)?))
    }

    fn grab_values(
        &self,
        path: &str,
        delim: &str,
        creator: &mut ValueSliceCreator<'_>,
        grabber: &mut ValueGrabber<'_>,
    ) -> Result<()> {
        let items = split_values(self.text(path)?, delim);
        creator(items.len());
        for item in items {
            grabber(RawValue::Text(item))?;
        }
        Ok(())
    }

    fn get_config_part(&self, path: &str) -> Result<Config> {
        match self.find(path) {
            Some(Found::Element(_)) => {
                let mut base = self.base.clone();
                base.extend(split_path(path).into_iter().map(str::to_string));
                Ok(Config::Xml(Self {
                    root: Arc::clone(&self.root),
                    base,
                }))
            }
            _ => Err(ConfigError::not_found(path)),
        }
    }
}
