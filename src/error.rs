use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised while sorting a list
pub enum SortError {
    /// Input is not well-formed XML.
    #[error("parse failed: {0}")]
    Parse(String),

    /// Input is well-formed but lacks the expected list/item shape.
    #[error("invalid structure: {0}")]
    Shape(String),

    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SortError {
    /// Message shown to the user by a host when the invocation fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            SortError::Parse(_) => "Failed to parse XML data.",
            SortError::Shape(_) => "Invalid XML data format.",
            SortError::Serialize(_) => "Failed to serialize XML data.",
            SortError::Io(_) => "Failed to access the selection.",
            SortError::Config(_) => "Invalid configuration.",
        }
    }
}
