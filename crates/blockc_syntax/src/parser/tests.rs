use super::*;
use crate::ast::{InputKind, Node};
use crate::writer::write_document;

const DEFAULT_PROGRAM: &str = r#"<xml xmlns="https://developers.google.com/blockly/xml">
    <block type="pin_digital_write" x="40" y="40">
      <field name="PIN">2</field>
      <field name="LEVEL">HIGH</field>
      <next>
        <block type="delay_ms">
          <field name="MS">500</field>
          <next>
            <block type="pin_digital_write">
              <field name="PIN">2</field>
              <field name="LEVEL">LOW</field>
              <next>
                <block type="delay_ms">
                  <field name="MS">500</field>
                </block>
              </next>
            </block>
          </next>
        </block>
      </next>
    </block>
  </xml>"#;

#[test]
fn test_parse_default_program() {
    let ws = parse_document(DEFAULT_PROGRAM).unwrap();
    assert_eq!(
        ws.attributes.get("xmlns").map(String::as_str),
        Some("https://developers.google.com/blockly/xml")
    );
    assert_eq!(ws.blocks.len(), 1);

    let first = &ws.blocks[0];
    assert_eq!(first.attributes.get("x").map(String::as_str), Some("40"));
    assert!(!first.attributes.contains_key("type"));

    let chain: Vec<(&str, Option<&str>)> = first
        .iter_chain()
        .map(|n| (n.type_id.as_str(), n.field("PIN").or(n.field("MS"))))
        .collect();
    assert_eq!(
        chain,
        [
            ("pin_digital_write", Some("2")),
            ("delay_ms", Some("500")),
            ("pin_digital_write", Some("2")),
            ("delay_ms", Some("500")),
        ]
    );
}

#[test]
fn test_parse_inputs_and_mutation() {
    let doc = r#"<xml>
      <block type="controls_if">
        <mutation elseif="1" else="1"/>
        <value name="IF0"><block type="logic_boolean"><field name="BOOL">TRUE</field></block></value>
        <statement name="DO0"><block type="delay_ms"><field name="MS">1</field></block></statement>
        <value name="IF1"><shadow type="logic_boolean"><field name="BOOL">FALSE</field></shadow></value>
        <statement name="ELSE"></statement>
      </block>
    </xml>"#;
    let ws = parse_document(doc).unwrap();
    let node = &ws.blocks[0];
    assert_eq!(node.mutation_attr("elseif"), Some("1"));
    assert_eq!(node.mutation_attr("else"), Some("1"));

    let names: Vec<&str> = node.inputs.keys().map(String::as_str).collect();
    assert_eq!(names, ["IF0", "DO0", "IF1", "ELSE"]);
    assert_eq!(node.input("DO0").unwrap().kind, InputKind::Statement);

    let if1 = node.input("IF1").unwrap();
    assert!(if1.block.is_none());
    let shadow = if1.connected().unwrap();
    assert!(shadow.shadow);
    assert_eq!(shadow.field("BOOL"), Some("FALSE"));
    assert!(node.input("ELSE").unwrap().connected().is_none());
}

#[test]
fn test_field_text_preserved_exactly() {
    let doc = "<xml><block type=\"text\"><field name=\"TEXT\">  two  spaces\n</field></block></xml>";
    let ws = parse_document(doc).unwrap();
    assert_eq!(ws.blocks[0].field("TEXT"), Some("  two  spaces\n"));

    let doc = "<xml><block type=\"text\"><field name=\"TEXT\">a<![CDATA[<b>]]>c</field></block></xml>";
    let ws = parse_document(doc).unwrap();
    assert_eq!(ws.blocks[0].field("TEXT"), Some("a<b>c"));
}

#[test]
fn test_multiple_top_level_chains() {
    let doc = r#"<xml><block type="a"></block><block type="b"/></xml>"#;
    let ws = parse_document(doc).unwrap();
    let ids: Vec<&str> = ws.blocks.iter().map(|b| b.type_id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn test_canonical_round_trip() {
    let ws = parse_document(DEFAULT_PROGRAM).unwrap();
    let canonical = write_document(&ws);
    assert_eq!(parse_document(&canonical).unwrap(), ws);
    assert_eq!(write_document(&parse_document(&canonical).unwrap()), canonical);
}

#[test]
fn test_long_chain_does_not_recurse() {
    let first = Node::chain((0..100_000).map(|i| Node::new("delay_ms").with_field("MS", i.to_string()))).unwrap();
    let ws = crate::ast::Workspace::with_chain(first);
    let parsed = parse_document(&write_document(&ws)).unwrap();
    assert_eq!(parsed.blocks[0].iter_chain().count(), 100_000);
    assert_eq!(parsed, ws);
}

/// `<block><value><block>…` nested `depth` inputs deep.
fn nested_values(depth: usize) -> String {
    let mut doc = String::from("<xml>");
    for _ in 0..depth {
        doc.push_str(r#"<block type="text_join"><mutation items="1"/><value name="ADD0">"#);
    }
    doc.push_str(r#"<block type="text"><field name="TEXT">x</field></block>"#);
    for _ in 0..depth {
        doc.push_str("</value></block>");
    }
    doc.push_str("</xml>");
    doc
}

#[test]
fn test_nesting_at_limit_parses() {
    let ws = parse_document(&nested_values(MAX_NESTING)).unwrap();
    let mut depth = 0;
    let mut node = &ws.blocks[0];
    while let Some(child) = node.input("ADD0").and_then(|i| i.connected()) {
        node = child;
        depth += 1;
    }
    assert_eq!(depth, MAX_NESTING);
    assert_eq!(node.type_id, "text");
}

#[test]
fn test_deep_nesting_is_rejected() {
    for depth in [MAX_NESTING + 1, 10_000] {
        let err = parse_document(&nested_values(depth)).unwrap_err();
        assert!(
            matches!(err, SyntaxError::TooDeep { limit: MAX_NESTING, .. }),
            "{:?}",
            err
        );
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_type() {
    let err = parse_document("<xml><block></block></xml>").unwrap_err();
    assert!(matches!(err, SyntaxError::MissingAttribute { attribute: "type", .. }));
}

#[test]
fn test_wrong_root() {
    let err = parse_document("<workspace></workspace>").unwrap_err();
    assert!(matches!(err, SyntaxError::InvalidRoot { ref found, .. } if found == "workspace"));
}

#[test]
fn test_mismatched_tag() {
    let err = parse_document("<xml><block type=\"a\"></xml></block>").unwrap_err();
    assert!(matches!(err, SyntaxError::MismatchedTag { ref expected, ref found, .. }
        if expected == "block" && found == "xml"));
}

#[test]
fn test_unclosed_element() {
    let err = parse_document("<xml><block type=\"a\">").unwrap_err();
    assert!(matches!(err, SyntaxError::Unterminated { what: "element", .. }));
}

#[test]
fn test_duplicate_field() {
    let doc = r#"<xml><block type="a"><field name="X">1</field><field name="X">2</field></block></xml>"#;
    let err = parse_document(doc).unwrap_err();
    assert!(matches!(err, SyntaxError::Duplicate { what: "field", ref name, .. } if name == "X"));
}

#[test]
fn test_empty_next() {
    let err = parse_document(r#"<xml><block type="a"><next></next></block></xml>"#).unwrap_err();
    assert!(matches!(err, SyntaxError::EmptyElement { ref name, .. } if name == "next"));
}

#[test]
fn test_stray_text_and_elements() {
    let err = parse_document(r#"<xml><block type="a">oops</block></xml>"#).unwrap_err();
    assert!(matches!(err, SyntaxError::UnexpectedText { ref parent, .. } if parent == "block"));

    let err = parse_document(r#"<xml><variables></variables></xml>"#).unwrap_err();
    assert!(matches!(err, SyntaxError::UnexpectedElement { ref name, .. } if name == "variables"));
}

#[test]
fn test_trailing_content() {
    let err = parse_document("<xml></xml><xml></xml>").unwrap_err();
    assert!(matches!(err, SyntaxError::TrailingContent { .. }));
}

#[test]
fn test_empty_document() {
    let err = parse_document("  ").unwrap_err();
    assert!(matches!(err, SyntaxError::UnexpectedEof { .. }));
}
