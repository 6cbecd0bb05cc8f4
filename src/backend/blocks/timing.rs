use blockc_syntax::Node;

use crate::backend::emitter::Emitter;
use crate::backend::errors::CompileError;
use crate::backend::registry::{FieldDomain, FieldSpec, NodeDef, NodeSchema, Registry};

const DELAY_MS: NodeSchema = NodeSchema {
    type_id: "delay_ms",
    fields: &[FieldSpec::new("MS", FieldDomain::Integer { min: Some(0), max: None })],
    inputs: &[],
};

pub(super) fn register(registry: &mut Registry) {
    registry.register(NodeDef::statement(DELAY_MS, delay_ms));
}

fn delay_ms(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    Ok(format!("delay({});", e.field_int(node, "MS")?))
}
