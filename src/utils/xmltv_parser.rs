//! Quick-XML based XMLTV parser
//!
//! The whole feed is loaded into a small element tree. Only element names,
//! attributes and text are kept; comments, processing instructions and the
//! doctype are dropped. Whitespace-only text between child elements is
//! treated as formatting and discarded.
//!
//! Documents are decoded to UTF-8 first, following their byte order mark or
//! the `encoding` of their XML declaration.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

use crate::errors::{AppError, AppResult};

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding a single text node
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.push_text(text);
        element
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Append text, merging with a trailing text node if there is one
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(XmlNode::Text(existing)) = self.children.last_mut() {
            existing.push_str(&text);
        } else {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Replace every child with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.push_text(text);
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// Concatenated direct text content
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Text of the first child with the given name; `Some("")` when the
    /// child exists but is empty
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(XmlElement::text)
    }

    /// This element and all its descendants with the given name, depth first
    pub fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for element in self.elements() {
            element.collect_descendants(name, found);
        }
    }

    fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    fn drop_blank_text(&mut self) {
        if self.has_element_children() {
            self.children.retain(|node| match node {
                XmlNode::Text(text) => !text.trim().is_empty(),
                XmlNode::Element(_) => true,
            });
        }
    }
}

/// Parse an XML document and return its root element
pub fn parse_document(content: &[u8]) -> AppResult<XmlElement> {
    let decoded = decode_document(content)?;
    let content = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);

    let mut reader = Reader::from_str(content);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                ensure_single_root(&root, &reader)?;
                stack.push(start_element(e, &reader)?);
            }

            Ok(Event::Empty(ref e)) => {
                ensure_single_root(&root, &reader)?;
                let element = start_element(e, &reader)?;
                close_element(element, &mut stack, &mut root);
            }

            Ok(Event::End(_)) => {
                let mut element = stack.pop().ok_or_else(|| {
                    AppError::parse(format!(
                        "Unexpected closing tag at position {}",
                        reader.buffer_position()
                    ))
                })?;
                element.drop_blank_text();
                close_element(element, &mut stack, &mut root);
            }

            Ok(Event::Text(e)) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|e| AppError::parse(format!("Invalid UTF-8 in text: {e}")))?;
                push_text(&mut stack, text, &reader)?;
            }

            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|e| AppError::parse(format!("Invalid UTF-8 in CDATA: {e}")))?;
                push_text(&mut stack, text, &reader)?;
            }

            Ok(Event::GeneralRef(e)) => {
                let resolved = if let Some(ch) = e
                    .resolve_char_ref()
                    .map_err(|e| AppError::parse(format!("Invalid character reference: {e}")))?
                {
                    ch.to_string()
                } else {
                    let name = e
                        .decode()
                        .map_err(|e| AppError::parse(format!("Invalid entity name: {e}")))?;
                    resolve_predefined_entity(&name)
                        .ok_or_else(|| AppError::parse(format!("Unknown entity &{name};")))?
                        .to_string()
                };
                push_text(&mut stack, &resolved, &reader)?;
            }

            Ok(Event::Eof) => break,

            Err(e) => {
                return Err(AppError::parse(format!(
                    "XML parsing error at position {}: {e}",
                    reader.error_position()
                )));
            }

            _ => {} // Declarations, doctype, comments and processing instructions
        }
    }

    if let Some(open) = stack.last() {
        return Err(AppError::parse(format!(
            "Unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| AppError::parse("XML document has no root element"))
}

/// Decode a document body to UTF-8 text
fn decode_document(content: &[u8]) -> AppResult<Cow<'_, str>> {
    let encoding = match Encoding::for_bom(content) {
        Some((encoding, _)) => encoding,
        None => declared_encoding(content)?.unwrap_or(UTF_8),
    };

    if encoding == UTF_8 {
        return std::str::from_utf8(content)
            .map(Cow::Borrowed)
            .map_err(|e| AppError::parse(format!("Invalid UTF-8 in XML document: {e}")));
    }

    let (text, _, had_errors) = encoding.decode(content);
    if had_errors {
        return Err(AppError::parse(format!(
            "Invalid {} data in XML document",
            encoding.name()
        )));
    }
    Ok(text)
}

/// Encoding named by the XML declaration, if any
///
/// A declared UTF-16 cannot be right once the declaration was readable as
/// ASCII, so it falls back to UTF-8.
fn declared_encoding(content: &[u8]) -> AppResult<Option<&'static Encoding>> {
    let mut reader = Reader::from_reader(content);
    let decl = match reader.read_event() {
        Ok(Event::Decl(decl)) => decl,
        _ => return Ok(None),
    };

    match decl.encoding() {
        None => Ok(None),
        Some(Err(e)) => Err(AppError::parse(format!("Malformed XML declaration: {e}"))),
        Some(Ok(label)) => Encoding::for_label(&label)
            .map(|encoding| Some(encoding.output_encoding()))
            .ok_or_else(|| {
                AppError::parse(format!(
                    "Unsupported document encoding '{}'",
                    String::from_utf8_lossy(&label)
                ))
            }),
    }
}

fn start_element(e: &BytesStart, reader: &Reader<&[u8]>) -> AppResult<XmlElement> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| AppError::parse(format!("Invalid UTF-8 in XML element name: {e}")))?
        .to_string();

    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            AppError::parse(format!("Malformed attribute in <{}>: {err}", element.name))
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| AppError::parse(format!("Invalid UTF-8 in attribute name: {e}")))?
            .to_string();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| AppError::parse(format!("Invalid value for attribute '{key}': {e}")))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn close_element(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.push_element(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [XmlElement], text: &str, reader: &Reader<&[u8]>) -> AppResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_text(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(AppError::parse(format!(
            "Text outside of the root element at position {}",
            reader.buffer_position()
        ))),
    }
}

fn ensure_single_root(root: &Option<XmlElement>, reader: &Reader<&[u8]>) -> AppResult<()> {
    if root.is_some() {
        return Err(AppError::parse(format!(
            "Multiple root elements, second one at position {}",
            reader.buffer_position()
        )));
    }
    Ok(())
}
