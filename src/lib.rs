#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # xml-list-sort

 Sorts the `<Item>` children of a selected `<List>` XML fragment by their numeric
 `Id` attribute and hands back the fragment re-indented for reading. It is meant to
 run behind an editor command: the host passes the selected text in and replaces
 the selection with the result, or shows an error and leaves the selection alone.

 ## Pipeline

 - **Reader:** parses the selection into a [`Document`](core::document::Document)
   tree ([`item::xml::XmlDocumentReader`]).
 - **Shape check:** parsed input must have a `<List>` root with at least one
   `<Item>` child ([`core::list::validate_shape`]). An
   [`ItemList`](core::list::ItemList) built directly with `ItemList::new` skips
   this check and may be empty; it sorts to itself and renders as `<List/>`.
 - **Processor:** stable-sorts the items by ascending numeric `Id`
   ([`item::sort::IdSortProcessor`]). Ids that are not numbers sort last.
 - **Writer:** serializes the tree back to XML with a declaration line
   ([`item::xml::XmlDocumentWriter`]).
 - **Formatter:** produces the final two-space layout, either from the tree
   ([`item::format::TreeFormatter`]) or by re-indenting the serialized text line
   by line ([`item::format::LineFormatter`]).

 Parse failures and shape failures are reported as distinct [`SortError`]
 variants; no output is produced when either occurs.

 ## Getting Started

```rust
use xml_list_sort::{sort_list, SortError};

fn main() -> Result<(), SortError> {
    let selection = r#"<List>
        <Item Id="3"/>
        <Item Id="1"><Text> hello </Text></Item>
        <Item Id="2"/>
    </List>"#;

    let sorted = sort_list(selection)?;

    assert_eq!(
        sorted,
        "<List>\n  <Item Id=\"1\">\n    <Text>hello</Text></Item>\n  <Item Id=\"2\"/>\n  <Item Id=\"3\"/></List>"
    );

    assert!(matches!(sort_list("<List><Item>"), Err(SortError::Parse(_))));
    assert!(matches!(sort_list("<Foo/>"), Err(SortError::Shape(_))));

    Ok(())
}
```
 */

/// Core types and pipeline traits
pub mod core;

/// Error types for sort operations
pub mod error;

/// Configuration of list names and output formatting
pub mod config;

#[doc(inline)]
pub use error::*;

/// XML reader / writer, sort processor and formatters
pub mod item;

use crate::config::SortConfig;
use crate::core::step::SortStep;

/// Sorts a `<List>` of `<Item Id="...">` elements with the default settings.
pub fn sort_list(input: &str) -> Result<String, SortError> {
    sort_list_with(input, &SortConfig::default())
}

/// Sorts the list in `input` using `config`.
pub fn sort_list_with(input: &str, config: &SortConfig) -> Result<String, SortError> {
    let step = SortStep::from_config(config)?;
    Ok(step.execute(input)?.output)
}
