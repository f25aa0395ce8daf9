pub mod mocks;

use xml_list_sort::core::document::Element;
use xml_list_sort::item::xml::parse;

/// Ids of the `Item` children of the list in `xml`, in document order.
pub fn item_ids(xml: &str) -> Vec<String> {
    let doc = parse(xml).expect("output should be well-formed XML");
    doc.root
        .child_elements()
        .filter(|element| element.name == "Item")
        .map(|item| item.attribute("Id").unwrap_or_default().to_string())
        .collect()
}

/// `Item` elements of the list in `xml`, in document order.
pub fn items(xml: &str) -> Vec<Element> {
    let doc = parse(xml).expect("output should be well-formed XML");
    doc.root
        .child_elements()
        .filter(|element| element.name == "Item")
        .cloned()
        .collect()
}
