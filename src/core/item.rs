use crate::core::document::Document;
use crate::core::list::ItemList;
use crate::error::SortError;

/// Result of parsing the selected text.
pub type DocumentReaderResult = Result<Document, SortError>;

/// Result of reordering a list: the number of items processed.
pub type ListProcessorResult = Result<usize, SortError>;

/// Result of rendering a document back to text.
pub type DocumentWriterResult = Result<String, SortError>;

/// Turns the raw selection into a [`Document`].
pub trait DocumentReader {
    fn read(&self, input: &str) -> DocumentReaderResult;
}

/// Reorders the items of a validated list in place.
pub trait ListProcessor {
    fn process(&self, list: &mut ItemList) -> ListProcessorResult;
}

/// Renders a document to XML text.
pub trait DocumentWriter {
    fn write(&self, doc: &Document) -> DocumentWriterResult;
}

/// Produces the final, readable text handed back to the host.
pub trait DocumentFormatter {
    /// Formats `doc`. `serialized` is the writer's output for the same document.
    fn format(&self, doc: &Document, serialized: &str) -> String;
}

/// A processor that leaves the list untouched.
#[derive(Default)]
pub struct DefaultProcessor {}

impl ListProcessor for DefaultProcessor {
    fn process(&self, list: &mut ItemList) -> ListProcessorResult {
        Ok(list.len())
    }
}
