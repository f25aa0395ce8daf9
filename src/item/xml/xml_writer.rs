use crate::core::document::{Document, Element, Node};
use crate::core::item::{DocumentWriter, DocumentWriterResult};
use crate::error::SortError;
use log::debug;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::io::Write;

/// Declaration emitted as the first line of every serialized document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// A writer that renders a [`Document`] to an XML string.
///
/// The output starts with a standalone XML declaration line, followed by one
/// tag per line indented by two spaces per level. Childless elements are
/// self-closed and text stays on the line of its element.
///
/// # Examples
///
/// ```
/// use xml_list_sort::core::document::{Document, Element};
/// use xml_list_sort::core::item::DocumentWriter;
/// use xml_list_sort::item::xml::XmlDocumentWriterBuilder;
///
/// let doc = Document::new(
///     Element::new("List")
///         .with_child(Element::new("Item").with_attribute("Id", "1"))
///         .with_child(Element::new("Item").with_attribute("Id", "2")),
/// );
///
/// let xml = XmlDocumentWriterBuilder::new().build().write(&doc).unwrap();
///
/// // The resulting XML:
/// // <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
/// // <List>
/// //   <Item Id="1"/>
/// //   <Item Id="2"/>
/// // </List>
/// assert!(xml.starts_with("<?xml"));
/// assert!(xml.contains(r#"<Item Id="2"/>"#));
/// ```
pub struct XmlDocumentWriter {
    indent_size: usize,
    declaration: bool,
}

impl DocumentWriter for XmlDocumentWriter {
    fn write(&self, doc: &Document) -> DocumentWriterResult {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent_size);

        if self.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
                .map_err(|e| {
                    SortError::Serialize(format!("Failed to write XML declaration: {}", e))
                })?;
        }

        write_element(&mut writer, &doc.root)?;

        let xml = String::from_utf8(writer.into_inner())
            .map_err(|e| SortError::Serialize(format!("Invalid UTF-8 in XML output: {}", e)))?;
        debug!("Serialized <{}> into {} bytes", doc.root.name, xml.len());
        Ok(xml)
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), SortError> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute((attr.key.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| SortError::Serialize(format!("Failed to write <{}>: {}", element.name, e)));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| SortError::Serialize(format!("Failed to write <{}>: {}", element.name, e)))?;

    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| SortError::Serialize(format!("Failed to write text: {}", e)))?,
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| SortError::Serialize(format!("Failed to write </{}>: {}", element.name, e)))
}

/// Drops the leading XML declaration line, if any.
pub fn strip_declaration(xml: &str) -> &str {
    if !xml.trim_start().starts_with("<?xml") {
        return xml;
    }
    match xml.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    }
}

/// Builder for creating XML document writers.
///
/// # Examples
///
/// ```
/// use xml_list_sort::item::xml::XmlDocumentWriterBuilder;
///
/// let writer = XmlDocumentWriterBuilder::new()
///     .indent_size(4)
///     .declaration(false)
///     .build();
/// ```
pub struct XmlDocumentWriterBuilder {
    indent_size: usize,
    declaration: bool,
}

impl Default for XmlDocumentWriterBuilder {
    fn default() -> Self {
        Self {
            indent_size: 2,
            declaration: true,
        }
    }
}

impl XmlDocumentWriterBuilder {
    /// Creates a builder with two-space indentation and the declaration enabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Whether to emit the XML declaration line.
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn build(self) -> XmlDocumentWriter {
        XmlDocumentWriter {
            indent_size: self.indent_size,
            declaration: self.declaration,
        }
    }
}
