use crate::core::document::{Attribute, Document, Element, Node};
use crate::core::item::{DocumentReader, DocumentReaderResult};
use crate::error::SortError;
use log::{debug, error};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::reader::Reader as XmlReader;
use std::fs;
use std::path::Path;
use std::str;

/// A builder for creating XML document readers.
///
/// # Examples
///
/// ```
/// use xml_list_sort::item::xml::XmlDocumentReaderBuilder;
/// use xml_list_sort::core::item::DocumentReader;
///
/// let reader = XmlDocumentReaderBuilder::new().build();
///
/// let doc = reader
///     .read(r#"<List><Item Id="2"/><Item Id="1"/></List>"#)
///     .unwrap();
///
/// assert_eq!(doc.root.name, "List");
/// assert_eq!(doc.root.children.len(), 2);
/// ```
#[derive(Default)]
pub struct XmlDocumentReaderBuilder {
    keep_formatting_whitespace: bool,
}

impl XmlDocumentReaderBuilder {
    /// Creates a new XML document reader builder.
    ///
    /// By default whitespace-only text between child elements is dropped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps whitespace-only text between child elements as text nodes.
    pub fn keep_formatting_whitespace(mut self, keep: bool) -> Self {
        self.keep_formatting_whitespace = keep;
        self
    }

    pub fn build(self) -> XmlDocumentReader {
        XmlDocumentReader {
            keep_formatting_whitespace: self.keep_formatting_whitespace,
        }
    }
}

/// Parses XML text into a [`Document`].
///
/// Element order, attribute order and attribute values are kept as written.
/// Text content is kept verbatim. Declarations, comments, processing
/// instructions and doctypes are skipped. CDATA is kept as text.
pub struct XmlDocumentReader {
    keep_formatting_whitespace: bool,
}

impl XmlDocumentReader {
    /// Reads and parses the file at `path`.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> DocumentReaderResult {
        let file_path = path.as_ref();
        let content = fs::read_to_string(file_path).map_err(|e| {
            error!("Failed to open XML file {}: {}", file_path.display(), e);
            SortError::Io(format!(
                "Failed to open XML file {}: {}",
                file_path.display(),
                e
            ))
        })?;
        self.read(&content)
    }

    fn close_element(
        &self,
        stack: &mut [Element],
        root: &mut Option<Element>,
        mut element: Element,
    ) -> Result<(), SortError> {
        if !self.keep_formatting_whitespace && element.has_element_children() {
            element
                .children
                .retain(|child| !matches!(child, Node::Text(text) if text.trim().is_empty()));
        }

        if let Some(parent) = stack.last_mut() {
            parent.children.push(Node::Element(element));
            return Ok(());
        }

        match root {
            Some(existing) => Err(SortError::Parse(format!(
                "multiple root elements: <{}> after <{}>",
                element.name, existing.name
            ))),
            None => {
                *root = Some(element);
                Ok(())
            }
        }
    }
}

impl DocumentReader for XmlDocumentReader {
    fn read(&self, input: &str) -> DocumentReaderResult {
        let mut reader = XmlReader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let position = reader.error_position();
                    debug!("XML parsing error at {}: {}", position, e);
                    return Err(SortError::Parse(format!(
                        "XML parsing error at position {}: {}",
                        position, e
                    )));
                }
            };

            match event {
                Event::Start(ref e) => {
                    stack.push(start_element(e)?);
                }
                Event::Empty(ref e) => {
                    let element = start_element(e)?;
                    self.close_element(&mut stack, &mut root, element)?;
                }
                Event::End(ref e) => {
                    let end_name = decode(e.name().as_ref())?.to_string();
                    let element = stack.pop().ok_or_else(|| {
                        SortError::Parse(format!("unexpected closing tag </{}>", end_name))
                    })?;
                    if element.name != end_name {
                        return Err(SortError::Parse(format!(
                            "closing tag </{}> does not match <{}>",
                            end_name, element.name
                        )));
                    }
                    self.close_element(&mut stack, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    push_text(&mut stack, decode(e.as_ref())?)?;
                }
                Event::CData(ref e) => {
                    push_text(&mut stack, decode(e.as_ref())?)?;
                }
                Event::GeneralRef(ref e) => {
                    let resolved = resolve_reference(e)?;
                    push_text(&mut stack, &resolved)?;
                }
                Event::Eof => break,
                _ => continue, // declaration, comments, processing instructions, doctype
            }
        }

        if let Some(open) = stack.last() {
            return Err(SortError::Parse(format!(
                "unexpected end of input: <{}> is not closed",
                open.name
            )));
        }

        let root = root.ok_or_else(|| SortError::Parse("no root element".to_string()))?;
        debug!(
            "Parsed <{}> with {} children",
            root.name,
            root.children.len()
        );
        Ok(Document::new(root))
    }
}

/// Parses `input` with the default reader settings.
pub fn parse(input: &str) -> DocumentReaderResult {
    XmlDocumentReaderBuilder::new().build().read(input)
}

fn decode(bytes: &[u8]) -> Result<&str, SortError> {
    str::from_utf8(bytes).map_err(|e| SortError::Parse(format!("invalid UTF-8: {}", e)))
}

fn start_element(start: &BytesStart) -> Result<Element, SortError> {
    let mut element = Element::new(decode(start.name().as_ref())?);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| SortError::Parse(format!("invalid attribute: {}", e)))?;
        let key = decode(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| SortError::Parse(format!("invalid value for attribute {}: {}", key, e)))?
            .into_owned();
        element.attributes.push(Attribute { key, value });
    }

    Ok(element)
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), SortError> {
    let Some(current) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(SortError::Parse(format!(
            "text outside of the root element: {:?}",
            text.trim()
        )));
    };

    // entity references split one text run into several events
    if let Some(Node::Text(previous)) = current.children.last_mut() {
        previous.push_str(text);
    } else {
        current.children.push(Node::Text(text.to_string()));
    }
    Ok(())
}

fn resolve_reference(reference: &BytesRef) -> Result<String, SortError> {
    let name = decode(reference.as_ref())?;
    let character = reference
        .resolve_char_ref()
        .map_err(|e| SortError::Parse(format!("invalid character reference &{};: {}", name, e)))?;
    if let Some(character) = character {
        return Ok(character.to_string());
    }

    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| SortError::Parse(format!("unknown entity &{};", name)))
}
