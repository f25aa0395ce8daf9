/// XML support for reading and writing list documents.
///
/// The reader turns the selected text into a [`Document`](crate::core::document::Document)
/// tree and the writer renders a tree back to text. Both are built on `quick-xml`.
///
/// # Examples
///
/// ```
/// use xml_list_sort::core::item::{DocumentReader, DocumentWriter};
/// use xml_list_sort::item::xml::{strip_declaration, XmlDocumentReaderBuilder, XmlDocumentWriterBuilder};
///
/// let reader = XmlDocumentReaderBuilder::new().build();
/// let writer = XmlDocumentWriterBuilder::new().build();
///
/// let doc = reader.read(r#"<List><Item Id="1"><Text>hi</Text></Item></List>"#).unwrap();
/// let xml = writer.write(&doc).unwrap();
///
/// assert_eq!(
///     strip_declaration(&xml),
///     "<List>\n  <Item Id=\"1\">\n    <Text>hi</Text>\n  </Item>\n</List>"
/// );
/// ```
pub mod xml_reader;
pub mod xml_writer;

pub use xml_reader::{parse, XmlDocumentReader, XmlDocumentReaderBuilder};
pub use xml_writer::{strip_declaration, XmlDocumentWriter, XmlDocumentWriterBuilder, XML_DECLARATION};
