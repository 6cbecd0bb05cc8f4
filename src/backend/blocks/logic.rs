//! Conditionals, comparisons and boolean logic.

use blockc_core::lang::board::BOOLEANS;
use blockc_core::lang::operators::{self, COMPARE_FIELDS, LOGIC_FIELDS, OperatorId, OperatorInfo};
use blockc_core::lang::order::Order;
use blockc_syntax::Node;

use crate::backend::emitter::Emitter;
use crate::backend::errors::CompileError;
use crate::backend::registry::{FieldDomain, FieldSpec, InputSpec, NodeDef, NodeSchema, Registry};

const IF: NodeSchema = NodeSchema {
    type_id: "controls_if",
    fields: &[],
    inputs: &[
        InputSpec::value("IF", "false").numbered(),
        InputSpec::statement("DO").numbered(),
        InputSpec::statement("ELSE"),
    ],
};

const COMPARE: NodeSchema = NodeSchema {
    type_id: "logic_compare",
    fields: &[FieldSpec::new("OP", FieldDomain::Choice(COMPARE_FIELDS))],
    inputs: &[InputSpec::value("A", "0"), InputSpec::value("B", "0")],
};

const OPERATION: NodeSchema = NodeSchema {
    type_id: "logic_operation",
    fields: &[FieldSpec::new("OP", FieldDomain::Choice(LOGIC_FIELDS))],
    inputs: &[InputSpec::value("A", "false"), InputSpec::value("B", "false")],
};

const BOOLEAN: NodeSchema = NodeSchema {
    type_id: "logic_boolean",
    fields: &[FieldSpec::new("BOOL", FieldDomain::Choice(&["TRUE", "FALSE"]))],
    inputs: &[],
};

pub(super) fn register(registry: &mut Registry) {
    registry.register(NodeDef::statement(IF, controls_if));
    registry.register(NodeDef::expression(COMPARE, compare));
    registry.register(NodeDef::expression(OPERATION, operation));
    registry.register(NodeDef::expression(BOOLEAN, boolean));
}

/// `if (c0) {..} else if (c1) {..} else {..}`, shaped by the `elseif`/`else` mutation.
fn controls_if(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    let else_ifs = e.mutation_count(node, "elseif", 0)?;
    let has_else = e.mutation_count(node, "else", 0)? > 0;

    let mut code = String::new();
    for n in 0..=else_ifs {
        let condition = e.value(node, &format!("IF{}", n), Order::NONE)?;
        let branch = e.statement_input(node, &format!("DO{}", n))?;
        if n > 0 {
            code.push_str(" else ");
        }
        code.push_str(&format!("if ({}) {{\n{}}}", condition, branch));
    }
    if has_else {
        let branch = e.statement_input(node, "ELSE")?;
        code.push_str(&format!(" else {{\n{}}}", branch));
    }
    Ok(code)
}

fn operator(node: &Node, e: &Emitter<'_>) -> Result<&'static OperatorInfo, CompileError> {
    let field = e.field(node, "OP")?;
    operators::from_field(field)
        .map(operators::info_for)
        .ok_or_else(|| CompileError::malformed_field(&node.type_id, "OP", format!("unknown operator `{}`", field)))
}

fn compare(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    let op = operator(node, e)?;
    // Comparisons are left-associative; a right operand of equal strength needs parentheses.
    let left = e.value(node, "A", op.order)?;
    let right = e.value(node, "B", Order(op.order.0 - 1))?;
    Ok((format!("{} {} {}", left, op.symbol, right), op.order))
}

fn operation(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    let op = operator(node, e)?;
    // With one side missing, fill it with the operator's identity so the other side decides.
    let (left, right) = match (e.is_connected(node, "A"), e.is_connected(node, "B")) {
        (false, false) => (e.value(node, "A", op.order)?, e.value(node, "B", op.order)?),
        _ => {
            let identity = if op.id == OperatorId::And { "true" } else { "false" };
            (
                e.value_or(node, "A", op.order, identity)?,
                e.value_or(node, "B", op.order, identity)?,
            )
        }
    };
    Ok((format!("{} {} {}", left, op.symbol, right), op.order))
}

fn boolean(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    let field = e.field(node, "BOOL")?;
    let literal = BOOLEANS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, literal)| *literal)
        .ok_or_else(|| CompileError::malformed_field(&node.type_id, "BOOL", format!("`{}` is not a boolean", field)))?;
    Ok((literal.to_string(), Order::ATOMIC))
}
