use log::debug;

use crate::core::item::{ListProcessor, ListProcessorResult};
use crate::core::list::{sort_items, ItemList};

/// Sorts items by the numeric value of a key attribute (`Id` by default).
///
/// Keys are coerced with [`SortKey::parse`](crate::core::list::SortKey::parse);
/// items without a number sort after all numbered items and the sort is stable.
///
/// # Examples
///
/// ```
/// use xml_list_sort::core::document::Element;
/// use xml_list_sort::core::item::ListProcessor;
/// use xml_list_sort::core::list::ItemList;
/// use xml_list_sort::item::sort::IdSortProcessor;
///
/// let root = Element::new("List")
///     .with_child(Element::new("Item").with_attribute("Id", "10"))
///     .with_child(Element::new("Item").with_attribute("Id", "9"));
/// let mut list = ItemList::new(root, "Item");
///
/// IdSortProcessor::default().process(&mut list).unwrap();
///
/// let ids: Vec<_> = list.items().filter_map(|item| item.attribute("Id")).collect();
/// assert_eq!(ids, vec!["9", "10"]);
/// ```
pub struct IdSortProcessor {
    key_attribute: String,
}

impl Default for IdSortProcessor {
    fn default() -> Self {
        Self::new("Id")
    }
}

impl IdSortProcessor {
    pub fn new<S: Into<String>>(key_attribute: S) -> Self {
        Self {
            key_attribute: key_attribute.into(),
        }
    }
}

impl ListProcessor for IdSortProcessor {
    fn process(&self, list: &mut ItemList) -> ListProcessorResult {
        let count = sort_items(list, &self.key_attribute);
        debug!("Sorted {} items by {}", count, self.key_attribute);
        Ok(count)
    }
}
