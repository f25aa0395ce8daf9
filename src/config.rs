use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::core::item::DocumentFormatter;
use crate::core::list::ListShape;
use crate::error::SortError;
use crate::item::format::{LineFormatterBuilder, TreeFormatter};

/// How the sorted document is turned into the final text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterMode {
    /// Pretty-print from the parsed tree.
    #[default]
    Tree,
    /// Re-indent the serialized text line by line.
    Line,
}

impl FromStr for FormatterMode {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(FormatterMode::Tree),
            "line" => Ok(FormatterMode::Line),
            other => Err(SortError::Config(format!(
                "unknown formatter '{}', expected 'tree' or 'line'",
                other
            ))),
        }
    }
}

/// Settings for one sort invocation.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use xml_list_sort::config::{FormatterMode, SortConfig};
///
/// let config = SortConfig::from_json_str(r#"{ "shape": { "item_tag": "Row" }, "formatter": "line" }"#).unwrap();
///
/// assert_eq!(config.shape.root_tag, "List");
/// assert_eq!(config.shape.item_tag, "Row");
/// assert_eq!(config.formatter, FormatterMode::Line);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub shape: ListShape,
    pub formatter: FormatterMode,
    /// Element whose text stays inline in line mode.
    pub inline_tag: String,
    pub indent_size: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            shape: ListShape::default(),
            formatter: FormatterMode::default(),
            inline_tag: "Text".to_string(),
            indent_size: 2,
        }
    }
}

impl SortConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SortError> {
        let config: SortConfig = serde_json::from_str(json)
            .map_err(|e| SortError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SortError> {
        let file_path = path.as_ref();
        let json = fs::read_to_string(file_path).map_err(|e| {
            error!("Failed to open configuration {}: {}", file_path.display(), e);
            SortError::Io(format!(
                "Failed to open configuration {}: {}",
                file_path.display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), SortError> {
        let names = [
            ("root_tag", &self.shape.root_tag),
            ("item_tag", &self.shape.item_tag),
            ("key_attribute", &self.shape.key_attribute),
            ("inline_tag", &self.inline_tag),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(SortError::Config(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }

    /// Builds the formatter selected by `formatter`.
    pub fn build_formatter(&self) -> Result<Box<dyn DocumentFormatter>, SortError> {
        match self.formatter {
            FormatterMode::Tree => Ok(Box::new(TreeFormatter::new(self.indent_size))),
            FormatterMode::Line => Ok(Box::new(
                LineFormatterBuilder::new()
                    .indent_size(self.indent_size)
                    .inline_tag(&self.inline_tag)
                    .build()?,
            )),
        }
    }
}
