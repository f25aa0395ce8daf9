use log::debug;
use quick_xml::escape::escape;

use crate::core::document::{Document, Element, Node};
use crate::core::item::DocumentFormatter;

/// Pretty-prints a [`Document`] from its tree, indenting by depth.
///
/// Layout:
/// - one element per line, indented `indent_size` spaces per level
/// - childless elements self-closed
/// - elements holding only text printed on one line with the text trimmed
/// - closing tags appended to the end of the last child's line
///
/// The line formatter gives the same string for serializer output as long as
/// the only elements holding text are its inline tag and that text fits on one
/// line. Other text-only elements keep their content here and lose it there.
///
/// # Examples
///
/// ```
/// use xml_list_sort::core::document::{Document, Element};
/// use xml_list_sort::item::format::TreeFormatter;
///
/// let doc = Document::new(
///     Element::new("List")
///         .with_child(
///             Element::new("Item")
///                 .with_attribute("Id", "1")
///                 .with_child(Element::new("Text").with_text(" hello ")),
///         )
///         .with_child(Element::new("Item").with_attribute("Id", "2")),
/// );
///
/// assert_eq!(
///     TreeFormatter::default().render(&doc),
///     "<List>\n  <Item Id=\"1\">\n    <Text>hello</Text></Item>\n  <Item Id=\"2\"/></List>"
/// );
/// ```
pub struct TreeFormatter {
    indent_size: usize,
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self { indent_size: 2 }
    }
}

impl TreeFormatter {
    pub fn new(indent_size: usize) -> Self {
        Self { indent_size }
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut lines = Vec::new();
        self.render_element(&doc.root, 0, &mut lines);
        lines.join("\n")
    }

    fn render_element(&self, element: &Element, depth: usize, lines: &mut Vec<String>) {
        let indent = " ".repeat(depth * self.indent_size);
        let open = open_tag(element);

        if element.children.is_empty() {
            lines.push(format!("{indent}{open}/>"));
            return;
        }

        if let Some(text) = element.text_content() {
            lines.push(format!(
                "{indent}{open}>{}</{}>",
                escape(text.trim()),
                element.name
            ));
            return;
        }

        lines.push(format!("{indent}{open}>"));
        let child_indent = " ".repeat((depth + 1) * self.indent_size);
        for child in &element.children {
            match child {
                Node::Element(child) => self.render_element(child, depth + 1, lines),
                Node::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        lines.push(format!("{child_indent}{}", escape(text)));
                    }
                }
            }
        }

        // the opening line was pushed above, so there is always a last line
        if let Some(last) = lines.last_mut() {
            last.push_str("</");
            last.push_str(&element.name);
            last.push('>');
        }
    }
}

/// `<name key="value" ...` without the closing bracket.
fn open_tag(element: &Element) -> String {
    let mut tag = String::with_capacity(element.name.len() + 1);
    tag.push('<');
    tag.push_str(&element.name);
    for attr in &element.attributes {
        tag.push(' ');
        tag.push_str(&attr.key);
        tag.push_str("=\"");
        tag.push_str(&escape(attr.value.as_str()));
        tag.push('"');
    }
    tag
}

impl DocumentFormatter for TreeFormatter {
    fn format(&self, doc: &Document, _serialized: &str) -> String {
        debug!("Pretty-printing <{}> from the tree", doc.root.name);
        self.render(doc)
    }
}
