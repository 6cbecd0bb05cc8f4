//! String literals and concatenation.

use blockc_core::lang::order::Order;
use blockc_core::strings::quote_cpp;
use blockc_syntax::Node;

use crate::backend::emitter::Emitter;
use crate::backend::errors::CompileError;
use crate::backend::registry::{FieldDomain, FieldSpec, InputSpec, NodeDef, NodeSchema, Registry};

const TEXT: NodeSchema = NodeSchema {
    type_id: "text",
    fields: &[FieldSpec::new("TEXT", FieldDomain::Text)],
    inputs: &[],
};

const JOIN: NodeSchema = NodeSchema {
    type_id: "text_join",
    fields: &[],
    inputs: &[InputSpec::value("ADD", "\"\"").numbered()],
};

/// Item count of a `text_join` without a mutation.
const DEFAULT_JOIN_ITEMS: usize = 2;

pub(super) fn register(registry: &mut Registry) {
    registry.register(NodeDef::expression(TEXT, text));
    registry.register(NodeDef::expression(JOIN, join));
}

fn text(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    Ok((quote_cpp(e.field(node, "TEXT")?), Order::ATOMIC))
}

/// Every item is converted with `String(..)`, so `+` concatenates whatever the
/// item's type.
fn join(node: &Node, e: &mut Emitter<'_>) -> Result<(String, Order), CompileError> {
    let items = e.mutation_count(node, "items", DEFAULT_JOIN_ITEMS)?;
    let mut parts = Vec::with_capacity(items);
    for n in 0..items {
        let item = e.value(node, &format!("ADD{}", n), Order::NONE)?;
        parts.push(format!("String({})", item));
    }
    Ok(match parts.len() {
        0 => ("\"\"".to_string(), Order::ATOMIC),
        1 => (parts.remove(0), Order::UNARY_POSTFIX),
        _ => (parts.join(" + "), Order::ADDITIVE),
    })
}
