//! Block registry: maps a block type id to its schema and generator.
//!
//! A registry is read-only once built and can be shared across concurrent
//! compilations. Each [`NodeDef`] pairs the declared shape of a block (fields,
//! sockets, socket defaults) with the function that turns it into code.

use std::collections::HashMap;

use blockc_core::lang::order::Order;
use blockc_core::strings::is_usable_identifier;
use blockc_syntax::{InputKind, Node};

use super::emitter::Emitter;
use super::errors::CompileError;

/// Generator for a statement block: returns the block's lines.
pub type StatementFn = fn(&Node, &mut Emitter<'_>) -> Result<String, CompileError>;

/// Generator for an expression block: returns the expression and its binding strength.
pub type ExpressionFn = fn(&Node, &mut Emitter<'_>) -> Result<(String, Order), CompileError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Statement,
    Expression,
}

#[derive(Clone, Copy)]
pub enum Generator {
    Statement(StatementFn),
    Expression(ExpressionFn),
}

impl Generator {
    pub fn kind(&self) -> NodeKind {
        match self {
            Generator::Statement(_) => NodeKind::Statement,
            Generator::Expression(_) => NodeKind::Expression,
        }
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Statement(_) => f.write_str("Generator::Statement(..)"),
            Generator::Expression(_) => f.write_str("Generator::Expression(..)"),
        }
    }
}

/// Accepted values for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDomain {
    /// Base-10 integer with optional inclusive bounds.
    Integer { min: Option<i64>, max: Option<i64> },
    /// Any finite decimal number.
    Number,
    /// One of a fixed set of spellings.
    Choice(&'static [&'static str]),
    /// Free text.
    Text,
    /// A C identifier that does not clash with a keyword or a sketch global.
    Identifier,
}

impl FieldDomain {
    /// Check `value` against the domain, describing the problem on failure.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match *self {
            FieldDomain::Integer { min, max } => {
                let n: i64 = value
                    .parse()
                    .map_err(|_| format!("`{}` is not an integer", value))?;
                if min.is_some_and(|lo| n < lo) || max.is_some_and(|hi| n > hi) {
                    return Err(format!("{} is outside {}", n, describe_range(min, max)));
                }
                Ok(())
            }
            FieldDomain::Number => {
                if is_decimal_literal(value) {
                    Ok(())
                } else {
                    Err(format!("`{}` is not a number", value))
                }
            }
            FieldDomain::Choice(options) => {
                if options.contains(&value) {
                    Ok(())
                } else {
                    Err(format!("`{}` is not one of {}", value, options.join(", ")))
                }
            }
            FieldDomain::Text => Ok(()),
            FieldDomain::Identifier => {
                if is_usable_identifier(value) {
                    Ok(())
                } else {
                    Err(format!("`{}` is not a usable variable name", value))
                }
            }
        }
    }
}

/// Plain decimal spelling (optional leading `-`) of a finite number.
pub(crate) fn is_decimal_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') && digits.parse::<f64>().is_ok_and(f64::is_finite)
}

fn describe_range(min: Option<i64>, max: Option<i64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{}..={}", lo, hi),
        (Some(lo), None) => format!("{}..", lo),
        (None, Some(hi)) => format!("..={}", hi),
        (None, None) => "any integer".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub domain: FieldDomain,
}

impl FieldSpec {
    pub const fn new(name: &'static str, domain: FieldDomain) -> Self {
        Self { name, domain }
    }
}

/// A socket declared by a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    pub name: &'static str,
    pub kind: InputKind,
    /// Literal used when a value socket has nothing connected.
    pub default: Option<&'static str>,
    /// `name` is a prefix for a numbered family (`IF0`, `IF1`, ...).
    pub repeated: bool,
}

impl InputSpec {
    pub const fn value(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Value,
            default: Some(default),
            repeated: false,
        }
    }

    /// A value socket that must be connected.
    pub const fn required_value(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Value,
            default: None,
            repeated: false,
        }
    }

    pub const fn statement(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Statement,
            default: None,
            repeated: false,
        }
    }

    pub const fn numbered(self) -> Self {
        Self { repeated: true, ..self }
    }

    /// Whether an input called `name` belongs to this spec.
    pub fn matches(&self, name: &str) -> bool {
        if !self.repeated {
            return name == self.name;
        }
        name.strip_prefix(self.name)
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// Declared shape of a block type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSchema {
    pub type_id: &'static str,
    pub fields: &'static [FieldSpec],
    pub inputs: &'static [InputSpec],
}

impl NodeSchema {
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|spec| spec.matches(name))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Check a node against this schema: every declared field present and in its
    /// domain, every input declared and of the right kind.
    pub fn validate(&self, node: &Node) -> Result<(), CompileError> {
        for spec in self.fields {
            let value = node
                .field(spec.name)
                .ok_or_else(|| CompileError::malformed_field(self.type_id, spec.name, "missing"))?;
            spec.domain
                .check(value)
                .map_err(|reason| CompileError::malformed_field(self.type_id, spec.name, reason))?;
        }
        for (name, input) in &node.inputs {
            let Some(spec) = self.input(name) else {
                return Err(CompileError::malformed_tree(format!(
                    "block `{}` has no input named `{}`",
                    self.type_id, name
                )));
            };
            if spec.kind != input.kind {
                return Err(CompileError::malformed_tree(format!(
                    "input `{}` of block `{}` must be a {} input",
                    name,
                    self.type_id,
                    spec.kind.tag()
                )));
            }
        }
        Ok(())
    }
}

/// A registered block: its schema and generator.
#[derive(Debug, Clone, Copy)]
pub struct NodeDef {
    pub schema: NodeSchema,
    pub generator: Generator,
}

impl NodeDef {
    pub const fn statement(schema: NodeSchema, generate: StatementFn) -> Self {
        Self {
            schema,
            generator: Generator::Statement(generate),
        }
    }

    pub const fn expression(schema: NodeSchema, generate: ExpressionFn) -> Self {
        Self {
            schema,
            generator: Generator::Expression(generate),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.generator.kind()
    }
}

/// Lookup table from block type id to definition.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    defs: HashMap<&'static str, NodeDef>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Arduino/ESP32 block set.
    pub fn arduino() -> Self {
        let mut registry = Self::new();
        super::blocks::register_all(&mut registry);
        registry
    }

    /// Add a definition, returning the one it replaced.
    pub fn register(&mut self, def: NodeDef) -> Option<NodeDef> {
        self.defs.insert(def.schema.type_id, def)
    }

    pub fn lookup(&self, type_id: &str) -> Result<&NodeDef, CompileError> {
        self.defs.get(type_id).ok_or_else(|| CompileError::unknown_node(type_id))
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.defs.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Registered type ids, sorted.
    pub fn type_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.defs.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn noop(_: &Node, _: &mut Emitter<'_>) -> Result<String, CompileError> {
        Ok(String::new())
    }

    const WIDGET: NodeSchema = NodeSchema {
        type_id: "widget",
        fields: &[FieldSpec::new("N", FieldDomain::Integer { min: Some(0), max: Some(9) })],
        inputs: &[InputSpec::value("IF", "false").numbered(), InputSpec::statement("ELSE")],
    };

    #[test]
    fn test_lookup_unknown_type() {
        let registry = Registry::new();
        assert_eq!(
            registry.lookup("servo_write").unwrap_err(),
            CompileError::unknown_node("servo_write")
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::new();
        assert!(registry.register(NodeDef::statement(WIDGET, noop)).is_none());
        assert!(registry.register(NodeDef::statement(WIDGET, noop)).is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("widget").unwrap().kind(), NodeKind::Statement);
    }

    #[test]
    fn test_arduino_block_set() {
        let registry = Registry::arduino();
        assert_eq!(
            registry.type_ids(),
            vec![
                "bluetooth_serial_begin",
                "bluetooth_serial_print",
                "controls_if",
                "delay_ms",
                "logic_boolean",
                "logic_compare",
                "logic_operation",
                "math_number",
                "pin_analog_read",
                "pin_digital_read",
                "pin_digital_write",
                "text",
                "text_join",
                "wifi_http_get",
                "wifi_setup",
            ]
        );
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }

    #[test]
    fn test_numbered_inputs() {
        let spec = InputSpec::value("IF", "false").numbered();
        assert!(spec.matches("IF0"));
        assert!(spec.matches("IF12"));
        assert!(!spec.matches("IF"));
        assert!(!spec.matches("IFX"));
        assert!(InputSpec::statement("ELSE").matches("ELSE"));
        assert!(!InputSpec::statement("ELSE").matches("ELSE0"));
    }

    #[test]
    fn test_integer_domain() {
        let pin = FieldDomain::Integer { min: Some(0), max: Some(39) };
        assert!(pin.check("0").is_ok());
        assert!(pin.check("39").is_ok());
        assert_eq!(pin.check("40").unwrap_err(), "40 is outside 0..=39");
        assert_eq!(pin.check("two").unwrap_err(), "`two` is not an integer");
        assert!(pin.check("").is_err());

        let ms = FieldDomain::Integer { min: Some(0), max: None };
        assert_eq!(ms.check("-1").unwrap_err(), "-1 is outside 0..");
    }

    #[test]
    fn test_number_domain() {
        for ok in ["0", "3.5", "-2", "1e3", ".5", "-0.25"] {
            assert!(FieldDomain::Number.check(ok).is_ok(), "{ok}");
        }
        for bad in ["", "abc", "inf", "-inf", "NaN", "1e999", "+1", "--1", "-"] {
            assert!(FieldDomain::Number.check(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_choice_and_identifier_domains() {
        let level = FieldDomain::Choice(&["HIGH", "LOW"]);
        assert!(level.check("HIGH").is_ok());
        assert_eq!(level.check("high").unwrap_err(), "`high` is not one of HIGH, LOW");

        assert!(FieldDomain::Identifier.check("payload").is_ok());
        assert!(FieldDomain::Identifier.check("int").is_err());
        assert!(FieldDomain::Identifier.check("http").is_err());
        assert!(FieldDomain::Identifier.check("9lives").is_err());
        assert!(FieldDomain::Text.check("anything \" goes").is_ok());
    }

    #[test]
    fn test_validate_fields() {
        assert!(WIDGET.validate(&Node::new("widget").with_field("N", "3")).is_ok());
        assert_eq!(
            WIDGET.validate(&Node::new("widget")).unwrap_err(),
            CompileError::malformed_field("widget", "N", "missing")
        );
        assert!(matches!(
            WIDGET.validate(&Node::new("widget").with_field("N", "12")),
            Err(CompileError::MalformedField { .. })
        ));
    }

    #[test]
    fn test_validate_inputs() {
        let base = || Node::new("widget").with_field("N", "1");

        let ok = base()
            .with_value("IF0", Node::new("x"))
            .with_statement("ELSE", Node::new("y"));
        assert!(WIDGET.validate(&ok).is_ok());

        let undeclared = base().with_value("WHILE", Node::new("x"));
        assert!(matches!(WIDGET.validate(&undeclared), Err(CompileError::MalformedTree { .. })));

        let wrong_kind = base().with_statement("IF0", Node::new("x"));
        assert!(matches!(WIDGET.validate(&wrong_kind), Err(CompileError::MalformedTree { .. })));
    }
}
