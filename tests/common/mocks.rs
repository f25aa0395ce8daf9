//! Mocks of the sort step seams
use mockall::mock;

use xml_list_sort::core::document::Document;
use xml_list_sort::core::item::{
    DocumentFormatter, DocumentWriter, DocumentWriterResult, ListProcessor, ListProcessorResult,
};
use xml_list_sort::core::list::ItemList;

mock! {
    pub Processor {}
    impl ListProcessor for Processor {
        fn process(&self, list: &mut ItemList) -> ListProcessorResult;
    }
}

mock! {
    pub Writer {}
    impl DocumentWriter for Writer {
        fn write(&self, doc: &Document) -> DocumentWriterResult;
    }
}

mock! {
    pub Formatter {}
    impl DocumentFormatter for Formatter {
        fn format(&self, doc: &Document, serialized: &str) -> String;
    }
}
