mod common;

use std::io::Write;

use tempfile::NamedTempFile;
use xml_list_sort::{
    config::{FormatterMode, SortConfig},
    core::{
        document::{Document, Element},
        item::{DocumentReader, DocumentWriter},
        list::{validate_shape, ItemList, ListShape},
        step::{SortStep, SortStepBuilder},
    },
    item::{
        format::TreeFormatter,
        xml::{strip_declaration, XmlDocumentReaderBuilder, XmlDocumentWriterBuilder},
    },
    sort_list, sort_list_with, SortError,
};

use common::{item_ids, items};

fn line_config() -> SortConfig {
    SortConfig {
        formatter: FormatterMode::Line,
        ..SortConfig::default()
    }
}

#[test]
fn sort_flat_list() {
    let _ = env_logger::try_init();

    let output = sort_list(r#"<List><Item Id="3"/><Item Id="1"/><Item Id="2"/></List>"#).unwrap();

    assert_eq!(
        output,
        "<List>\n  <Item Id=\"1\"/>\n  <Item Id=\"2\"/>\n  <Item Id=\"3\"/></List>"
    );
}

#[test]
fn sort_keeps_inline_text_trimmed() {
    let input = r#"<List>
        <Item Id="2"><Text> world </Text></Item>
        <Item Id="1"><Text> hello </Text></Item>
    </List>"#;

    for config in [SortConfig::default(), line_config()] {
        let output = sort_list_with(input, &config).unwrap();

        assert_eq!(
            output,
            "<List>\n  <Item Id=\"1\">\n    <Text>hello</Text></Item>\n  <Item Id=\"2\">\n    <Text>world</Text></Item></List>"
        );
    }
}

#[test]
fn sort_output_has_no_declaration_or_outer_whitespace() {
    let output = sort_list("\n\n   <List><Item Id=\"1\"/></List>   \n").unwrap();

    assert!(!output.contains("<?xml"));
    assert_eq!(output, output.trim());
}

#[test]
fn sort_is_idempotent() {
    let input = r#"<List>
        <Item Id="10"><Text>ten</Text></Item>
        <Item Id="x"><Text>nan</Text></Item>
        <Item Id="-4"/>
        <Item Id="10"><Text>another ten</Text></Item>
        <Item Id=" 2 "/>
    </List>"#;

    for config in [SortConfig::default(), line_config()] {
        let once = sort_list_with(input, &config).unwrap();
        let twice = sort_list_with(&once, &config).unwrap();

        assert_eq!(once, twice);
    }
}

#[test]
fn sort_preserves_every_item() {
    let input = r#"<List>
        <Item Id="5" Color="red"><Text>five</Text><Note Level="1"><Text>nested</Text></Note></Item>
        <Item Id="1" Color="blue"/>
        <Item Id="3"><Text>three</Text></Item>
        <Item Id="1" Color="green"/>
        <Item Id="abc"/>
    </List>"#;

    let output = sort_list(input).unwrap();

    let mut before: Vec<String> = items(input).iter().map(|item| format!("{:?}", item)).collect();
    let mut after: Vec<String> = items(&output).iter().map(|item| format!("{:?}", item)).collect();
    assert_eq!(before.len(), after.len());
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn sort_is_stable_for_equal_and_non_numeric_ids() {
    let input = r#"<List>
        <Item Id="2" Tag="a"/>
        <Item Id="b" Tag="b"/>
        <Item Id="1" Tag="c"/>
        <Item Id="2" Tag="d"/>
        <Item Tag="e"/>
        <Item Id="02" Tag="f"/>
        <Item Id="a" Tag="g"/>
    </List>"#;

    let output = sort_list(input).unwrap();

    let tags: Vec<String> = items(&output)
        .iter()
        .map(|item| item.attribute("Tag").unwrap_or_default().to_string())
        .collect();
    assert_eq!(tags, vec!["c", "a", "d", "f", "b", "e", "g"]);
}

#[test]
fn sort_is_numeric() {
    let input = r#"<List><Item Id="100"/><Item Id="20"/><Item Id="3"/><Item Id="-1"/><Item Id="0"/></List>"#;

    let output = sort_list(input).unwrap();

    assert_eq!(item_ids(&output), vec!["-1", "0", "3", "20", "100"]);
}

#[test]
fn sort_many_items() {
    let mut input = String::from("<List>");
    for id in (0..200).rev() {
        input.push_str(&format!("<Item Id=\"{}\"><Text>item {}</Text></Item>", id, id));
    }
    input.push_str("</List>");

    let output = sort_list(&input).unwrap();

    let expected: Vec<String> = (0..200).map(|id| id.to_string()).collect();
    assert_eq!(item_ids(&output), expected);
}

#[test]
fn sort_keeps_other_children_of_the_list() {
    let input = r#"<List Name="numbers"><Header>top</Header><Item Id="2"/><Item Id="1"/></List>"#;

    let output = sort_list(input).unwrap();

    assert_eq!(
        output,
        "<List Name=\"numbers\">\n  <Header>top</Header>\n  <Item Id=\"1\"/>\n  <Item Id=\"2\"/></List>"
    );
}

#[test]
fn empty_item_sequence_round_trips_to_empty_list() {
    let list = ItemList::new(Element::new("List"), "Item");
    let doc = list.into_document();

    let serialized = XmlDocumentWriterBuilder::new().build().write(&doc).unwrap();

    assert_eq!(strip_declaration(&serialized), "<List/>");
    assert_eq!(TreeFormatter::default().render(&doc), "<List/>");
    assert_eq!(
        XmlDocumentReaderBuilder::new().build().read(&serialized).unwrap(),
        Document::new(Element::new("List"))
    );
    // the same document coming from a selection is rejected
    assert!(matches!(
        validate_shape(doc, &ListShape::default()),
        Err(SortError::Shape(_))
    ));
}

#[test]
fn sort_with_custom_shape() {
    let config = SortConfig {
        shape: ListShape {
            root_tag: "Playlist".to_string(),
            item_tag: "Track".to_string(),
            key_attribute: "Number".to_string(),
        },
        ..SortConfig::default()
    };

    let output = sort_list_with(
        r#"<Playlist><Track Number="2" Id="1"/><Track Number="1" Id="2"/></Playlist>"#,
        &config,
    )
    .unwrap();

    assert_eq!(
        output,
        "<Playlist>\n  <Track Number=\"1\" Id=\"2\"/>\n  <Track Number=\"2\" Id=\"1\"/></Playlist>"
    );
}

#[test]
fn sort_selection_from_file() {
    let _ = env_logger::try_init();

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"<List>\n  <Item Id=\"9\"/>\n  <Item Id=\"8\"/>\n</List>\n")
        .unwrap();

    let doc = XmlDocumentReaderBuilder::new()
        .build()
        .read_path(temp_file.path())
        .unwrap();
    let serialized = XmlDocumentWriterBuilder::new()
        .declaration(false)
        .build()
        .write(&doc)
        .unwrap();

    let execution = SortStepBuilder::new().build().execute(&serialized).unwrap();

    assert_eq!(execution.item_count, 2);
    assert_eq!(item_ids(&execution.output), vec!["8", "9"]);
}

#[test]
fn step_from_config_reports_item_count() {
    let _ = env_logger::try_init();

    let step = SortStep::from_config(&SortConfig::default()).unwrap();

    let execution = step
        .execute(r#"<List><Item Id="1"/><Item Id="3"/><Item Id="2"/></List>"#)
        .unwrap();

    assert_eq!(execution.item_count, 3);
    assert!(execution.end >= execution.start);
}

#[test]
fn only_tree_formatter_keeps_text_of_other_elements() {
    let input = r#"<List><Item Id="2"><Name>two</Name></Item><Item Id="1"><Name>one</Name></Item></List>"#;

    let tree = sort_list_with(input, &SortConfig::default()).unwrap();
    let line = sort_list_with(input, &line_config()).unwrap();

    assert_eq!(
        tree,
        "<List>\n  <Item Id=\"1\">\n    <Name>one</Name></Item>\n  <Item Id=\"2\">\n    <Name>two</Name></Item></List>"
    );
    assert_eq!(
        line,
        "<List>\n  <Item Id=\"1\">\n    <Name></Name></Item>\n  <Item Id=\"2\">\n    <Name></Name></Item></List>"
    );
}
