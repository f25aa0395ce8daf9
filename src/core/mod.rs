/// Document tree produced by the reader and consumed by the writer.
pub mod document;

/// Traits for the pipeline seams: reader, processor, writer, formatter.
pub mod item;

/// List shape validation, sort keys and the sort itself.
pub mod list;

/// The sort step wiring every stage together.
pub mod step;
