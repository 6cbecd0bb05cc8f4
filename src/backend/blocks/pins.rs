//! GPIO blocks.

use blockc_core::lang::board::{LEVELS, PIN_MAX, PIN_MIN};
use blockc_core::lang::order::Order;
use blockc_syntax::Node;

use crate::backend::emitter::Emitter;
use crate::backend::errors::CompileError;
use crate::backend::registry::{FieldDomain, FieldSpec, NodeDef, NodeSchema, Registry};

const PIN: FieldSpec = FieldSpec::new(
    "PIN",
    FieldDomain::Integer {
        min: Some(PIN_MIN),
        max: Some(PIN_MAX),
    },
);

const DIGITAL_WRITE: NodeSchema = NodeSchema {
    type_id: "pin_digital_write",
    fields: &[PIN, FieldSpec::new("LEVEL", FieldDomain::Choice(LEVELS))],
    inputs: &[],
};

const DIGITAL_READ: NodeSchema = NodeSchema {
    type_id: "pin_digital_read",
    fields: &[PIN],
    inputs: &[],
};

const ANALOG_READ: NodeSchema = NodeSchema {
    type_id: "pin_analog_read",
    fields: &[PIN],
    inputs: &[],
};

pub(super) fn register(registry: &mut Registry) {
    registry.register(NodeDef::statement(DIGITAL_WRITE, digital_write));
    registry.register(NodeDef::expression(DIGITAL_READ, digital_read));
    registry.register(NodeDef::expression(ANALOG_READ, analog_read));
}

fn digital_write(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    let pin = e.field_int(node, "PIN")?;
    let level = e.field(node, "LEVEL")?;
    e.add_init_line(format!("pinMode({}, OUTPUT);", pin));
    Ok(format!("digitalWrite({}, {});", pin, level))
}

fn digital_read(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    let pin = e.field_int(node, "PIN")?;
    e.add_init_line(format!("pinMode({}, INPUT);", pin));
    Ok((format!("digitalRead({})", pin), Order::ATOMIC))
}

// Analog inputs need no pinMode on the ESP32.
fn analog_read(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    let pin = e.field_int(node, "PIN")?;
    Ok((format!("analogRead({})", pin), Order::ATOMIC))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::blocks::test_support::{expr, run};

    fn write(pin: &str, level: &str) -> Node {
        Node::new("pin_digital_write").with_field("PIN", pin).with_field("LEVEL", level)
    }

    #[test]
    fn test_digital_write() {
        let (main, ctx) = run(write("2", "HIGH")).unwrap();
        assert_eq!(main, "digitalWrite(2, HIGH);\n");
        assert_eq!(ctx.init_lines().collect::<Vec<_>>(), vec!["pinMode(2, OUTPUT);"]);
    }

    #[test]
    fn test_repeated_pin_configures_once() {
        let chain = Node::chain([write("2", "HIGH"), write("4", "LOW"), write("2", "LOW")]).unwrap();
        let (main, ctx) = run(chain).unwrap();
        assert_eq!(main, "digitalWrite(2, HIGH);\ndigitalWrite(4, LOW);\ndigitalWrite(2, LOW);\n");
        assert_eq!(
            ctx.init_lines().collect::<Vec<_>>(),
            vec!["pinMode(2, OUTPUT);", "pinMode(4, OUTPUT);"]
        );
    }

    #[test]
    fn test_pin_number_is_normalized() {
        let (main, _) = run(write("013", "LOW")).unwrap();
        assert_eq!(main, "digitalWrite(13, LOW);\n");
    }

    #[test]
    fn test_reads() {
        let read = Node::new("pin_digital_read").with_field("PIN", "5");
        assert_eq!(expr(read).unwrap(), "digitalRead(5)");
        let analog = Node::new("pin_analog_read").with_field("PIN", "34");
        assert_eq!(expr(analog).unwrap(), "analogRead(34)");
    }

    #[test]
    fn test_rejects_bad_fields() {
        for (pin, level) in [("40", "HIGH"), ("-1", "HIGH"), ("D2", "HIGH"), ("2", "ON")] {
            assert!(
                matches!(run(write(pin, level)), Err(CompileError::MalformedField { .. })),
                "{pin} {level}"
            );
        }
        let missing = Node::new("pin_digital_write").with_field("PIN", "2");
        assert_eq!(
            run(missing).unwrap_err(),
            CompileError::malformed_field("pin_digital_write", "LEVEL", "missing")
        );
    }
}
