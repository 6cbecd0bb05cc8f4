//! Classic Bluetooth serial blocks.
//!
//! The `SerialBT` object is a file-scope global so both entry points can use it.

use blockc_core::lang::order::Order;
use blockc_core::strings::quote_cpp;
use blockc_syntax::Node;

use crate::backend::emitter::Emitter;
use crate::backend::errors::CompileError;
use crate::backend::registry::{FieldDomain, FieldSpec, InputSpec, NodeDef, NodeSchema, Registry};

const BEGIN: NodeSchema = NodeSchema {
    type_id: "bluetooth_serial_begin",
    fields: &[FieldSpec::new("NAME", FieldDomain::Text)],
    inputs: &[],
};

const PRINT: NodeSchema = NodeSchema {
    type_id: "bluetooth_serial_print",
    fields: &[],
    inputs: &[InputSpec::value("TEXT", "\"\"")],
};

pub(super) fn register(registry: &mut Registry) {
    registry.register(NodeDef::statement(BEGIN, begin));
    registry.register(NodeDef::statement(PRINT, print));
}

fn declare_serial_bt(e: &mut Emitter<'_>) {
    e.add_declaration("bt_include", "#include <BluetoothSerial.h>");
    e.add_declaration("bt_serial", "BluetoothSerial SerialBT;");
}

fn begin(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    let name = quote_cpp(e.field(node, "NAME")?);
    declare_serial_bt(e);
    e.add_init_line(format!("SerialBT.begin({});", name));
    Ok(String::new())
}

fn print(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    declare_serial_bt(e);
    let text = e.value(node, "TEXT", Order::NONE)?;
    Ok(format!("SerialBT.println({});", text))
}
