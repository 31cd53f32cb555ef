//! XMLTV serialization
//!
//! Writes an element tree as an indented UTF-8 XMLTV document through
//! quick-xml, which takes care of escaping text and attribute values.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use crate::errors::AppResult;
use crate::models::OutputDocument;
use crate::utils::xmltv_parser::{XmlElement, XmlNode};

const XMLTV_DOCTYPE: &str = r#"tv SYSTEM "xmltv.dtd""#;
const INDENT_SIZE: usize = 2;

/// Write a listings document to `sink` with an XML declaration, the XMLTV
/// doctype and two-space indentation
pub fn write_document<W: Write>(document: &OutputDocument, sink: W) -> AppResult<()> {
    let root = document.to_element();
    write_root(&root, sink)?;
    debug!(
        "Serialized XMLTV document: channels={} programmes={}",
        document.channels.len(),
        document.programmes.len()
    );
    Ok(())
}

/// Write any element as the root of an XMLTV document
pub fn write_root<W: Write>(root: &XmlElement, sink: W) -> AppResult<()> {
    let mut writer = Writer::new_with_indent(sink, b' ', INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(XMLTV_DOCTYPE)))?;
    write_element(&mut writer, root)?;

    let sink = writer.get_mut();
    sink.write_all(b"\n")?;
    sink.flush()?;
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> AppResult<()> {
    let start = BytesStart::new(element.name.as_str()).with_attributes(
        element
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Serialize a document into an in-memory string
pub fn document_to_string(document: &OutputDocument) -> AppResult<String> {
    let mut buffer = Vec::new();
    write_document(document, &mut buffer)?;
    // quick-xml only ever writes the UTF-8 text it was given
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
