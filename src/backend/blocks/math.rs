use blockc_core::lang::order::Order;
use blockc_syntax::Node;

use crate::backend::emitter::Emitter;
use crate::backend::errors::CompileError;
use crate::backend::registry::{FieldDomain, FieldSpec, NodeDef, NodeSchema, Registry};

const NUMBER: NodeSchema = NodeSchema {
    type_id: "math_number",
    fields: &[FieldSpec::new("NUM", FieldDomain::Number)],
    inputs: &[],
};

pub(super) fn register(registry: &mut Registry) {
    registry.register(NodeDef::expression(NUMBER, number));
}

/// Numeric literal in canonical decimal form. Integers never get leading zeros,
/// which C++ would read as octal.
fn number(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    let raw = e.field(node, "NUM")?;
    let literal = match raw.parse::<i64>() {
        Ok(n) => n.to_string(),
        Err(_) => {
            let n: f64 = raw
                .parse()
                .map_err(|_| CompileError::malformed_field(&node.type_id, "NUM", format!("`{}` is not a number", raw)))?;
            float_literal(n)
        }
    };
    let order = if literal.starts_with('-') {
        Order::UNARY_PREFIX
    } else {
        Order::ATOMIC
    };
    Ok((literal, order))
}

fn float_literal(n: f64) -> String {
    if n != n.trunc() {
        n.to_string()
    } else if n.abs() < 1e15 {
        // Keep a fractional part so the literal stays a double.
        format!("{:.1}", n)
    } else {
        // Too wide for a plain integer literal; exponent form is still a double.
        format!("{:e}", n)
    }
}
