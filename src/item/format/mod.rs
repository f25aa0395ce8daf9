/// Formatters turning a sorted document into the text handed back to the host.
///
/// Both strategies use one layout (two-space nesting, closing tags collapsed
/// onto the last line of their content, inline `Text` content):
///
/// - [`TreeFormatter`] walks the parsed tree; indentation is the tree depth.
/// - [`LineFormatter`] re-indents the serialized string one line at a time
///   without parsing it, and assumes one tag per line. Only the inline tag
///   keeps its text, and only single-line text.
pub mod line_formatter;
pub mod tree_formatter;

pub use line_formatter::{LineFormatter, LineFormatterBuilder};
pub use tree_formatter::TreeFormatter;
