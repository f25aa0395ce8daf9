use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::document::{Document, Element, Node};
use crate::error::SortError;

/// Names describing the expected list structure.
///
/// Defaults to `<List>` holding `<Item Id="...">` children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListShape {
    pub root_tag: String,
    pub item_tag: String,
    pub key_attribute: String,
}

impl Default for ListShape {
    fn default() -> Self {
        Self {
            root_tag: "List".to_string(),
            item_tag: "Item".to_string(),
            key_attribute: "Id".to_string(),
        }
    }
}

/// Sort key of an item, coerced permissively from the key attribute.
///
/// Numbers order numerically and every number orders before `NotANumber`.
/// Two `NotANumber` keys compare equal so a stable sort keeps them in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    Number(i64),
    NotANumber,
}

impl SortKey {
    /// Parses a base-10 integer the permissive way: leading whitespace is
    /// skipped, an optional sign is accepted, the longest run of ASCII digits
    /// is read and anything after it is ignored. Without any digit the key is
    /// `NotANumber`. Out-of-range values saturate.
    ///
    /// ```
    /// use xml_list_sort::core::list::SortKey;
    ///
    /// assert_eq!(SortKey::parse(" 42px"), SortKey::Number(42));
    /// assert_eq!(SortKey::parse("-7"), SortKey::Number(-7));
    /// assert_eq!(SortKey::parse("abc"), SortKey::NotANumber);
    /// ```
    pub fn parse(raw: &str) -> SortKey {
        let rest = raw.trim_start();
        let (negative, digits) = match rest.as_bytes().first() {
            Some(b'-') => (true, &rest[1..]),
            Some(b'+') => (false, &rest[1..]),
            _ => (false, rest),
        };

        let mut value: i64 = 0;
        let mut seen_digit = false;
        let mut saturated = false;
        for byte in digits.bytes() {
            if !byte.is_ascii_digit() {
                break;
            }
            seen_digit = true;
            if saturated {
                continue;
            }
            let digit = i64::from(byte - b'0');
            let next = value.checked_mul(10).and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            });
            match next {
                Some(v) => value = v,
                None => {
                    value = if negative { i64::MIN } else { i64::MAX };
                    saturated = true;
                }
            }
        }

        if seen_digit {
            SortKey::Number(value)
        } else {
            SortKey::NotANumber
        }
    }

    /// Key of an item node; a missing attribute is `NotANumber`.
    pub fn of(node: &Node, key_attribute: &str) -> SortKey {
        node.as_element()
            .and_then(|element| element.attribute(key_attribute))
            .map_or(SortKey::NotANumber, SortKey::parse)
    }
}

/// A document whose root has been checked to be a list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList {
    root: Element,
    item_tag: String,
}

impl ItemList {
    /// Builds a list directly, without shape validation. An empty list is valid.
    pub fn new<S: Into<String>>(root: Element, item_tag: S) -> Self {
        Self {
            root,
            item_tag: item_tag.into(),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn item_tag(&self) -> &str {
        &self.item_tag
    }

    /// Item elements in current order.
    pub fn items(&self) -> impl Iterator<Item = &Element> {
        let item_tag = self.item_tag.as_str();
        self.root
            .child_elements()
            .filter(move |element| element.name == item_tag)
    }

    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_document(self) -> Document {
        Document::new(self.root)
    }

    /// Indices in `root.children` that hold items.
    fn item_slots(&self) -> Vec<usize> {
        self.root
            .children
            .iter()
            .enumerate()
            .filter(|(_, child)| child.is_element_named(&self.item_tag))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Checks that `doc` is a `shape.root_tag` element with at least one
/// `shape.item_tag` child.
pub fn validate_shape(doc: Document, shape: &ListShape) -> Result<ItemList, SortError> {
    let root = doc.root;

    if root.name != shape.root_tag {
        return Err(SortError::Shape(format!(
            "expected root element <{}>, found <{}>",
            shape.root_tag, root.name
        )));
    }

    if !root
        .children
        .iter()
        .any(|child| child.is_element_named(&shape.item_tag))
    {
        return Err(SortError::Shape(format!(
            "<{}> has no <{}> children",
            shape.root_tag, shape.item_tag
        )));
    }

    let list = ItemList::new(root, shape.item_tag.clone());
    debug!("Validated <{}> with {} items", shape.root_tag, list.len());
    Ok(list)
}

/// Stable-sorts the items of `list` by ascending [`SortKey`] of `key_attribute`.
///
/// Items are moved whole; non-item children of the root keep their positions.
/// Returns the number of items.
pub fn sort_items(list: &mut ItemList, key_attribute: &str) -> usize {
    let slots = list.item_slots();

    let mut items: Vec<(SortKey, Node)> = slots
        .iter()
        .map(|&slot| {
            let node = std::mem::replace(&mut list.root.children[slot], Node::Text(String::new()));
            (SortKey::of(&node, key_attribute), node)
        })
        .collect();

    // slice::sort_by is stable
    items.sort_by(|(a, _), (b, _)| a.cmp(b));

    let count = items.len();
    for (slot, (_, node)) in slots.into_iter().zip(items) {
        list.root.children[slot] = node;
    }
    count
}
