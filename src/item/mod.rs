/// XML reader and writer built on `quick-xml`.
pub mod xml;

/// Sort processor ordering items by their key attribute.
pub mod sort;

/// Formatters producing the final indented text.
pub mod format;
