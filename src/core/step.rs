use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::config::SortConfig;
use crate::core::item::{DocumentFormatter, DocumentReader, DocumentWriter, ListProcessor};
use crate::core::list::{validate_shape, ListShape};
use crate::error::SortError;
use crate::item::format::TreeFormatter;
use crate::item::sort::IdSortProcessor;
use crate::item::xml::{XmlDocumentReaderBuilder, XmlDocumentWriterBuilder};

/// Whether the formatted output differs from the selection it was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Changed,
    /// The selection is already sorted and formatted; replacing it is a no-op.
    Unchanged,
}

/// Outcome of a successful sort step.
#[derive(Debug)]
pub struct StepExecution {
    /// Formatted text that replaces the selection.
    pub output: String,
    /// Number of items that were sorted.
    pub item_count: usize,
    pub status: StepStatus,
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
}

/// One invocation of "sort the selected list": parse, check the shape, sort,
/// serialize and format.
///
/// Any error stops the step before output is produced, so the caller never
/// sees a partial result.
pub struct SortStep<'a> {
    reader: Box<dyn DocumentReader + 'a>,
    processor: Box<dyn ListProcessor + 'a>,
    writer: Box<dyn DocumentWriter + 'a>,
    formatter: Box<dyn DocumentFormatter + 'a>,
    shape: ListShape,
}

impl<'a> SortStep<'a> {
    /// Builds a step with the default XML reader and writer, the id sort
    /// processor and the formatter selected by `config`.
    pub fn from_config(config: &SortConfig) -> Result<SortStep<'a>, SortError> {
        config.validate()?;
        Ok(SortStepBuilder::new()
            .shape(config.shape.clone())
            .processor(IdSortProcessor::new(config.shape.key_attribute.as_str()))
            .writer(
                XmlDocumentWriterBuilder::new()
                    .indent_size(config.indent_size)
                    .build(),
            )
            .boxed_formatter(config.build_formatter()?)
            .build())
    }

    pub fn execute(&self, input: &str) -> Result<StepExecution, SortError> {
        let start = Instant::now();

        debug!("Start of sort step");

        let doc = self.reader.read(input).inspect_err(|err| {
            error!("Error occured during parse: {}", err);
        })?;

        let mut list = validate_shape(doc, &self.shape).inspect_err(|err| {
            error!("Error occured during shape check: {}", err);
        })?;

        let item_count = self.processor.process(&mut list).inspect_err(|err| {
            error!("Error occured during sort: {}", err);
        })?;

        let doc = list.into_document();
        let serialized = self.writer.write(&doc).inspect_err(|err| {
            error!("Error occured during serialization: {}", err);
        })?;

        let output = self.formatter.format(&doc, &serialized);
        let status = if output == input {
            StepStatus::Unchanged
        } else {
            StepStatus::Changed
        };

        debug!("End of sort step with status {:?}", status);
        info!(
            "Sorted {} <{}> items in {:?}",
            item_count,
            self.shape.item_tag,
            start.elapsed()
        );

        Ok(StepExecution {
            output,
            item_count,
            status,
            start,
            end: Instant::now(),
            duration: start.elapsed(),
        })
    }
}

/// Builder for [`SortStep`]. Every part has a default.
///
/// # Examples
///
/// ```
/// use xml_list_sort::core::step::SortStepBuilder;
///
/// let step = SortStepBuilder::new().build();
///
/// let execution = step
///     .execute(r#"<List><Item Id="3"/><Item Id="1"/><Item Id="2"/></List>"#)
///     .unwrap();
///
/// assert_eq!(execution.item_count, 3);
/// assert_eq!(
///     execution.output,
///     "<List>\n  <Item Id=\"1\"/>\n  <Item Id=\"2\"/>\n  <Item Id=\"3\"/></List>"
/// );
/// ```
#[derive(Default)]
pub struct SortStepBuilder<'a> {
    reader: Option<Box<dyn DocumentReader + 'a>>,
    processor: Option<Box<dyn ListProcessor + 'a>>,
    writer: Option<Box<dyn DocumentWriter + 'a>>,
    formatter: Option<Box<dyn DocumentFormatter + 'a>>,
    shape: Option<ListShape>,
}

impl<'a> SortStepBuilder<'a> {
    pub fn new() -> SortStepBuilder<'a> {
        Self::default()
    }

    pub fn reader(mut self, reader: impl DocumentReader + 'a) -> SortStepBuilder<'a> {
        self.reader = Some(Box::new(reader));
        self
    }

    pub fn processor(mut self, processor: impl ListProcessor + 'a) -> SortStepBuilder<'a> {
        self.processor = Some(Box::new(processor));
        self
    }

    pub fn writer(mut self, writer: impl DocumentWriter + 'a) -> SortStepBuilder<'a> {
        self.writer = Some(Box::new(writer));
        self
    }

    pub fn formatter(mut self, formatter: impl DocumentFormatter + 'a) -> SortStepBuilder<'a> {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn boxed_formatter(
        mut self,
        formatter: Box<dyn DocumentFormatter + 'a>,
    ) -> SortStepBuilder<'a> {
        self.formatter = Some(formatter);
        self
    }

    pub fn shape(mut self, shape: ListShape) -> SortStepBuilder<'a> {
        self.shape = Some(shape);
        self
    }

    pub fn build(self) -> SortStep<'a> {
        let shape = self.shape.unwrap_or_default();
        let key_attribute = shape.key_attribute.clone();
        SortStep {
            reader: self
                .reader
                .unwrap_or_else(|| Box::new(XmlDocumentReaderBuilder::new().build())),
            processor: self
                .processor
                .unwrap_or_else(|| Box::new(IdSortProcessor::new(key_attribute))),
            writer: self
                .writer
                .unwrap_or_else(|| Box::new(XmlDocumentWriterBuilder::new().build())),
            formatter: self
                .formatter
                .unwrap_or_else(|| Box::new(TreeFormatter::default())),
            shape,
        }
    }
}
