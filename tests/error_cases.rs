mod common;

use common::mocks::{MockFormatter, MockProcessor, MockWriter};

use xml_list_sort::{
    core::{list::ListShape, step::SortStepBuilder},
    item::format::TreeFormatter,
    sort_list, SortError,
};

fn assert_parse_error(input: &str) {
    let result = sort_list(input);
    assert!(
        matches!(result, Err(SortError::Parse(_))),
        "expected parse error for {:?}, got {:?}",
        input,
        result
    );
}

fn assert_shape_error(input: &str) {
    let result = sort_list(input);
    assert!(
        matches!(result, Err(SortError::Shape(_))),
        "expected shape error for {:?}, got {:?}",
        input,
        result
    );
}

#[test]
fn malformed_xml_is_a_parse_error() {
    assert_parse_error(r#"<List><Item Id="1"></List>"#);
    assert_parse_error(r#"<List><Item Id="1"/>"#);
    assert_parse_error(r#"<List><Item Id="1"/></List></List>"#);
    assert_parse_error(r#"<List><Item Id=1/></List>"#);
    assert_parse_error("<List><Item Id=\"1\"/></List><List/>");
    assert_parse_error("");
}

#[test]
fn well_formed_xml_without_list_is_a_shape_error() {
    assert_shape_error("<Foo/>");
    assert_shape_error(r#"<Items><Item Id="1"/></Items>"#);
    assert_shape_error(r#"<List><Entry Id="1"/></List>"#);
    assert_shape_error("<List/>");
    assert_shape_error("<List>just text</List>");
}

#[test]
fn nested_list_is_not_a_list_root() {
    assert_shape_error(r#"<Root><List><Item Id="1"/></List></Root>"#);
}

#[test]
fn error_messages_for_the_user() {
    let parse = sort_list("<List>").unwrap_err();
    let shape = sort_list("<Foo/>").unwrap_err();

    assert_eq!(parse.user_message(), "Failed to parse XML data.");
    assert_eq!(shape.user_message(), "Invalid XML data format.");
}

#[test]
fn parse_error_stops_before_sort_and_write() {
    let _ = env_logger::try_init();

    let mut processor = MockProcessor::new();
    processor.expect_process().never();
    let mut writer = MockWriter::new();
    writer.expect_write().never();
    let mut formatter = MockFormatter::new();
    formatter.expect_format().never();

    let step = SortStepBuilder::new()
        .processor(processor)
        .writer(writer)
        .formatter(formatter)
        .build();

    let result = step.execute(r#"<List><Item Id="2"><Item Id="1"/></List>"#);

    assert!(matches!(result, Err(SortError::Parse(_))));
}

#[test]
fn shape_error_stops_before_sort_and_write() {
    let _ = env_logger::try_init();

    let mut processor = MockProcessor::new();
    processor.expect_process().never();
    let mut writer = MockWriter::new();
    writer.expect_write().never();

    let step = SortStepBuilder::new()
        .processor(processor)
        .writer(writer)
        .build();

    let result = step.execute("<Foo><Item Id=\"1\"/></Foo>");

    assert!(matches!(result, Err(SortError::Shape(_))));
}

#[test]
fn processor_error_stops_before_write() {
    let _ = env_logger::try_init();

    let mut processor = MockProcessor::new();
    processor
        .expect_process()
        .times(1)
        .returning(|_| Err(SortError::Shape("rejected".to_string())));
    let mut writer = MockWriter::new();
    writer.expect_write().never();

    let step = SortStepBuilder::new()
        .processor(processor)
        .writer(writer)
        .build();

    let result = step.execute(r#"<List><Item Id="1"/></List>"#);

    assert_eq!(result.unwrap_err(), SortError::Shape("rejected".to_string()));
}

#[test]
fn writer_error_stops_before_format() {
    let mut writer = MockWriter::new();
    writer
        .expect_write()
        .times(1)
        .returning(|_| Err(SortError::Serialize("disk full".to_string())));
    let mut formatter = MockFormatter::new();
    formatter.expect_format().never();

    let step = SortStepBuilder::new()
        .writer(writer)
        .formatter(formatter)
        .build();

    let result = step.execute(r#"<List><Item Id="1"/></List>"#);

    assert!(matches!(result, Err(SortError::Serialize(_))));
}

#[test]
fn formatter_receives_sorted_document_and_serialized_text() {
    let mut writer = MockWriter::new();
    writer
        .expect_write()
        .times(1)
        .returning(|doc| Ok(format!("serialized {}", doc.root.children.len())));
    let mut formatter = MockFormatter::new();
    formatter
        .expect_format()
        .times(1)
        .withf(|doc, serialized| {
            let ids: Vec<&str> = doc
                .root
                .child_elements()
                .filter_map(|item| item.attribute("Id"))
                .collect();
            ids == vec!["1", "2"] && serialized == "serialized 2"
        })
        .returning(|_, _| "formatted".to_string());

    let step = SortStepBuilder::new()
        .writer(writer)
        .formatter(formatter)
        .build();

    let execution = step
        .execute(r#"<List><Item Id="2"/><Item Id="1"/></List>"#)
        .unwrap();

    assert_eq!(execution.output, "formatted");
}

#[test]
fn custom_shape_rejects_default_list() {
    let shape = ListShape {
        root_tag: "Rows".to_string(),
        ..ListShape::default()
    };
    let step = SortStepBuilder::new()
        .shape(shape)
        .formatter(TreeFormatter::default())
        .build();

    let result = step.execute(r#"<List><Item Id="1"/></List>"#);

    assert!(matches!(result, Err(SortError::Shape(_))));
}
