//! Integration tests for the blockc pipeline: document text in, sketch out.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use blockc::backend::{CompileError, Emitter, FieldDomain, FieldSpec, InputSpec, NodeDef, NodeSchema, Registry};
use blockc::{Compiler, Error, GeneratorConfig};
use blockc_core::lang::order::Order;
use blockc_syntax::{Node, Workspace};

const BLINK: &str = r#"<xml>
  <block type="pin_digital_write">
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
              <block type="delay_ms"><field name="MS">500</field></block>
            </next>
          </block>
        </next>
      </block>
    </next>
  </block>
</xml>"#;

fn write(pin: &str, level: &str) -> Node {
    Node::new("pin_digital_write")
        .with_field("PIN", pin)
        .with_field("LEVEL", level)
}

fn delay(ms: &str) -> Node {
    Node::new("delay_ms").with_field("MS", ms)
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_blink_configures_pin_once() {
    let sketch = blockc::compile_document(BLINK).unwrap();
    assert_eq!(sketch.matches("pinMode(2, OUTPUT);").count(), 1);
    assert_eq!(
        sketch,
        "void setup() {\n  pinMode(2, OUTPUT);\n}\n\nvoid loop() {\n  digitalWrite(2, HIGH);\n  delay(500);\n  digitalWrite(2, LOW);\n  delay(500);\n}\n"
    );
}

#[test]
fn test_compilation_is_deterministic() {
    let first = blockc::compile_document(BLINK).unwrap();
    for _ in 0..5 {
        assert_eq!(blockc::compile_document(BLINK).unwrap(), first);
    }
}

#[test]
fn test_runs_do_not_share_context() {
    let compiler = Compiler::new(blockc::backend::arduino_registry());
    let with_wifi = Workspace::with_chain(
        Node::new("wifi_setup")
            .with_field("SSID", "home")
            .with_field("PASSWORD", "secret"),
    );
    let plain = Workspace::with_chain(delay("10"));

    let first = compiler.compile(&with_wifi).unwrap();
    assert!(first.starts_with("#include <WiFi.h>\n"));

    let second = compiler.compile(&plain).unwrap();
    assert!(!second.contains("WiFi"), "context leaked into the next run:\n{}", second);
    assert_eq!(second, "void setup() {\n}\n\nvoid loop() {\n  delay(10);\n}\n");
}

#[test]
fn test_empty_document_gets_placeholder() {
    let sketch = blockc::compile_document("<xml></xml>").unwrap();
    assert_eq!(sketch, "void setup() {\n}\n\nvoid loop() {\n  // loop body\n}\n");
}

#[test]
fn test_indent_width_applies_everywhere() {
    let tree = Workspace::with_chain(
        Node::new("controls_if")
            .with_value("IF0", Node::new("logic_boolean").with_field("BOOL", "TRUE"))
            .with_statement("DO0", write("4", "HIGH")),
    );
    let config = GeneratorConfig::new().with_indent_width(4);
    let sketch = Compiler::new(blockc::backend::arduino_registry())
        .with_config(config)
        .compile(&tree)
        .unwrap();
    assert_eq!(
        sketch,
        "void setup() {\n    pinMode(4, OUTPUT);\n}\n\nvoid loop() {\n    if (true) {\n        digitalWrite(4, HIGH);\n    }\n}\n"
    );
}

#[test]
fn test_custom_entry_points_and_placeholder() {
    let config = GeneratorConfig::new()
        .with_entry_points("init", "tick")
        .with_loop_placeholder("// idle");
    let sketch = blockc::compile_document_with("<xml/>", &config).unwrap();
    assert_eq!(sketch, "void init() {\n}\n\nvoid tick() {\n  // idle\n}\n");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_block_aborts() {
    let doc = r#"<xml><block type="delay_ms"><field name="MS">1</field><next><block type="servo_write"></block></next></block></xml>"#;
    let err = blockc::compile_document(doc).unwrap_err();
    assert_eq!(
        err,
        Error::Compile(CompileError::UnknownNodeType {
            type_id: "servo_write".to_string()
        })
    );
}

#[test]
fn test_syntax_errors_surface_as_syntax() {
    let err = blockc::compile_document("<xml><block type=\"delay_ms\">").unwrap_err();
    assert!(matches!(err, Error::Syntax(_)), "{:?}", err);
}

#[test]
fn test_bad_field_is_rejected() {
    let err = blockc::compile_document(r#"<xml><block type="delay_ms"><field name="MS">soon</field></block></xml>"#)
        .unwrap_err();
    assert!(
        matches!(err, Error::Compile(CompileError::MalformedField { ref field, .. }) if field == "MS"),
        "{:?}",
        err
    );
}

#[test]
fn test_depth_limit_is_an_error() {
    let mut node = delay("1");
    for _ in 0..20 {
        node = Node::new("controls_if").with_statement("DO0", node);
    }
    let config = GeneratorConfig::new().with_max_depth(8);
    let err = Compiler::new(blockc::backend::arduino_registry())
        .with_config(config)
        .compile(&Workspace::with_chain(node))
        .unwrap_err();
    assert!(matches!(err, CompileError::MalformedTree { .. }), "{:?}", err);
}

/// A print whose text is `depth` nested single-item joins.
fn nested_joins(depth: usize) -> String {
    let mut doc = String::from(r#"<xml><block type="bluetooth_serial_print"><value name="TEXT">"#);
    for _ in 0..depth {
        doc.push_str(r#"<block type="text_join"><mutation items="1"/><value name="ADD0">"#);
    }
    doc.push_str(r#"<block type="text"><field name="TEXT">x</field></block>"#);
    for _ in 0..depth {
        doc.push_str("</value></block>");
    }
    doc.push_str("</value></block></xml>");
    doc
}

/// `delay_ms` statements chained through nested `<next>` elements.
fn long_chain(len: usize) -> String {
    let mut doc = String::from("<xml>");
    for i in 0..len {
        doc.push_str(&format!(r#"<block type="delay_ms"><field name="MS">{}</field><next>"#, i));
    }
    doc.push_str(r#"<block type="delay_ms"><field name="MS">0</field></block>"#);
    for _ in 0..len {
        doc.push_str("</next></block>");
    }
    doc.push_str("</xml>");
    doc
}

#[test]
fn test_deep_nesting_is_reported_not_fatal() {
    let err = blockc::compile_document(&nested_joins(300)).unwrap_err();
    assert!(matches!(err, Error::Compile(CompileError::MalformedTree { .. })), "{:?}", err);

    for depth in [5_000, 20_000] {
        let err = blockc::compile_document(&nested_joins(depth)).unwrap_err();
        assert!(matches!(err, Error::Syntax(blockc::SyntaxError::TooDeep { .. })), "{:?}", err);
    }
}

#[test]
fn test_long_document_chain_compiles() {
    let sketch = blockc::compile_document(&long_chain(100_000)).unwrap();
    assert_eq!(sketch.matches("delay(").count(), 100_001);
    assert!(sketch.contains("  delay(99999);\n  delay(0);\n}\n"));
}

// ============================================================================
// Extending the registry
// ============================================================================

const TONE: NodeSchema = NodeSchema {
    type_id: "tone_play",
    fields: &[FieldSpec::new("PIN", FieldDomain::Integer { min: Some(0), max: Some(39) })],
    inputs: &[InputSpec::required_value("FREQ")],
};

fn tone(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    let pin = e.field_int(node, "PIN")?;
    let freq = e.value(node, "FREQ", Order::NONE)?;
    e.add_init_line(format!("pinMode({}, OUTPUT);", pin));
    Ok(format!("tone({}, {});", pin, freq))
}

fn extended() -> Registry {
    let mut registry = Registry::arduino();
    assert!(registry.register(NodeDef::statement(TONE, tone)).is_none());
    registry
}

#[test]
fn test_custom_block_generates() {
    let registry = extended();
    let tree = Workspace::with_chain(
        Node::new("tone_play")
            .with_field("PIN", "12")
            .with_value("FREQ", Node::new("math_number").with_field("NUM", "440")),
    );
    let sketch = Compiler::new(&registry).compile(&tree).unwrap();
    assert!(sketch.contains("  pinMode(12, OUTPUT);\n"));
    assert!(sketch.contains("  tone(12, 440);\n"));
}

#[test]
fn test_required_input_without_block() {
    let registry = extended();
    let tree = Workspace::with_chain(Node::new("tone_play").with_field("PIN", "12"));
    let err = Compiler::new(&registry).compile(&tree).unwrap_err();
    assert_eq!(
        err,
        CompileError::MissingInput {
            type_id: "tone_play".to_string(),
            input: "FREQ".to_string()
        }
    );
}

// ============================================================================
// Binary
// ============================================================================

fn scratch(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("blockc_it_{}_{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}.xml", name));
    fs::write(&path, contents).unwrap();
    path
}

fn blockc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_blockc"))
}

#[test]
fn test_cli_emit_prints_sketch() {
    let path = scratch("emit", BLINK);
    let output = blockc().arg("emit").arg(&path).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        blockc::compile_document(BLINK).unwrap()
    );
}

#[test]
fn test_cli_reports_unknown_block() {
    let path = scratch("unknown", r#"<xml><block type="servo_write"/></xml>"#);
    let output = blockc().arg("emit").arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("servo_write"));
}

#[test]
fn test_cli_flash_request_payload() {
    let path = scratch("flash", BLINK);
    let output = blockc()
        .args(["flash-request", "--board", "esp32_devkit"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["board_id"], "esp32_devkit");
    assert_eq!(payload["project_name"], "blockly_project");
    assert_eq!(payload["code"], blockc::compile_document(BLINK).unwrap());
}

#[test]
fn test_cli_project_payload() {
    let path = scratch("blinky", BLINK);
    let output = blockc()
        .args(["project", "--id", "p-7"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let record: blockc::ProjectRecord = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record.identifier, "p-7");
    assert_eq!(record.name, "blinky");
    assert_eq!(record.blocks_xml, BLINK);
    assert!(record.code.contains("digitalWrite(2, HIGH);"));
}

#[test]
fn test_cli_handles_long_chain() {
    let path = scratch("long_chain", &long_chain(100_000));
    let output = blockc().arg("emit").arg(&path).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).matches("delay(").count(), 100_001);

    assert!(blockc().arg("fmt").arg(&path).status().unwrap().success());
    assert!(blockc().args(["fmt", "--check"]).arg(&path).status().unwrap().success());
    let output = blockc().arg("emit").arg(&path).output().unwrap();
    assert!(output.status.success());
}

#[test]
fn test_cli_reports_deep_nesting() {
    let path = scratch("deep", &nested_joins(20_000));
    let output = blockc().arg("emit").arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nested more than"));
}

#[test]
fn test_chain_of_many_statements() {
    let nodes = (0..2_000).map(|i| delay(&i.to_string()));
    let tree = Workspace::with_chain(Node::chain(nodes).unwrap());
    let sketch = blockc::compile(&tree).unwrap();
    assert!(sketch.contains("  delay(0);\n"));
    assert!(sketch.contains("  delay(1999);\n"));
}
