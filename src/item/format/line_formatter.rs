use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::document::Document;
use crate::core::item::DocumentFormatter;
use crate::error::SortError;
use crate::item::xml::strip_declaration;

/// First opening (or self-closing) tag on a line.
static OPEN_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^/!?][^>]*>").unwrap());

/// First closing tag on a line.
static CLOSE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</[^>]+>").unwrap());

/// Re-indents serialized XML line by line, without parsing it.
///
/// Each input line is expected to hold one tag, or one opening tag with its
/// text and closing tag. Opening tags are indented by the current level;
/// closing tags are appended to the end of the previous output line; the text
/// of the inline tag (`Text` by default) is put back between its tags, trimmed.
/// Lines that break the one-tag-per-line assumption are formatted as well as
/// the rules allow and never reported.
///
/// Text is only kept for the inline tag, and only when it sits on one line.
/// Any other element holding text, and inline text spanning several lines,
/// comes out with empty content (`<Name></Name>`). Use
/// [`TreeFormatter`](super::TreeFormatter) when items carry such payload.
///
/// # Examples
///
/// ```
/// use xml_list_sort::item::format::LineFormatterBuilder;
///
/// let formatter = LineFormatterBuilder::new().build().unwrap();
///
/// let fragment = "<List>\n  <Item Id=\"1\">\n    <Text> hello </Text>\n  </Item>\n  <Item Id=\"2\"/>\n</List>";
///
/// assert_eq!(
///     formatter.reindent(fragment),
///     "<List>\n  <Item Id=\"1\">\n    <Text>hello</Text></Item>\n  <Item Id=\"2\"/></List>"
/// );
/// ```
pub struct LineFormatter {
    indent_size: usize,
    inline_pattern: Regex,
    inline_close: String,
}

impl LineFormatter {
    pub fn reindent(&self, fragment: &str) -> String {
        let mut result = String::with_capacity(fragment.len());
        let mut indent_level: usize = 0;

        for line in fragment.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let self_closing = trimmed.ends_with("/>");

            if let Some(open) = OPEN_TAG.find(trimmed) {
                result.push_str(&" ".repeat(indent_level));
                result.push_str(open.as_str());
                result.push('\n');
                if !self_closing {
                    indent_level += self.indent_size;
                }
            }

            if let Some(close) = CLOSE_TAG.find(trimmed) {
                indent_level = indent_level.saturating_sub(self.indent_size);
                if !self_closing {
                    let kept = result.trim_end().len();
                    result.truncate(kept);
                    result.push_str(close.as_str());
                    result.push('\n');
                }
            }

            if let Some(captures) = self.inline_pattern.captures(trimmed) {
                let content = captures.get(1).map_or("", |m| m.as_str()).trim();
                if !content.is_empty() {
                    if let Some(position) = result.rfind(&self.inline_close) {
                        result.insert_str(position, content);
                    }
                }
            }
        }

        result.trim().to_string()
    }
}

impl DocumentFormatter for LineFormatter {
    fn format(&self, doc: &Document, serialized: &str) -> String {
        debug!("Re-indenting <{}> line by line", doc.root.name);
        self.reindent(strip_declaration(serialized))
    }
}

/// Builder for [`LineFormatter`].
pub struct LineFormatterBuilder {
    indent_size: usize,
    inline_tag: String,
}

impl Default for LineFormatterBuilder {
    fn default() -> Self {
        Self {
            indent_size: 2,
            inline_tag: "Text".to_string(),
        }
    }
}

impl LineFormatterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Element whose text content is kept on the line of its tags.
    pub fn inline_tag<S: AsRef<str>>(mut self, inline_tag: S) -> Self {
        self.inline_tag = inline_tag.as_ref().to_string();
        self
    }

    pub fn build(self) -> Result<LineFormatter, SortError> {
        if self.inline_tag.is_empty() {
            return Err(SortError::Config("inline tag must not be empty".to_string()));
        }
        let tag = regex::escape(&self.inline_tag);
        let inline_pattern = Regex::new(&format!(r"<{tag}(?:\s[^>]*)?>(.*?)</{tag}>"))
            .map_err(|e| SortError::Config(format!("invalid inline tag: {}", e)))?;

        Ok(LineFormatter {
            indent_size: self.indent_size,
            inline_pattern,
            inline_close: format!("</{}>", self.inline_tag),
        })
    }
}
