//! WiFi station and HTTP client blocks.
//!
//! `wifi_setup` produces no main-sequence code: it only contributes the include
//! and the connect sequence to `setup()`. `wifi_http_get` emits a braced scope so
//! repeated requests never redeclare `http` or `httpCode`.

use blockc_core::strings::quote_cpp;
use blockc_syntax::Node;

use crate::backend::emitter::Emitter;
use crate::backend::errors::CompileError;
use crate::backend::registry::{FieldDomain, FieldSpec, NodeDef, NodeSchema, Registry};
use crate::backend::sketch_emitter::SketchEmitter;

use super::require_serial;

const SETUP: NodeSchema = NodeSchema {
    type_id: "wifi_setup",
    fields: &[
        FieldSpec::new("SSID", FieldDomain::Text),
        FieldSpec::new("PASSWORD", FieldDomain::Text),
    ],
    inputs: &[],
};

const HTTP_GET: NodeSchema = NodeSchema {
    type_id: "wifi_http_get",
    fields: &[
        FieldSpec::new("URL", FieldDomain::Text),
        FieldSpec::new("VAR", FieldDomain::Identifier),
    ],
    inputs: &[],
};

pub(super) fn register(registry: &mut Registry) {
    registry.register(NodeDef::statement(SETUP, wifi_setup));
    registry.register(NodeDef::statement(HTTP_GET, http_get));
}

fn wifi_setup(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    let ssid = quote_cpp(e.field(node, "SSID")?);
    let password = quote_cpp(e.field(node, "PASSWORD")?);

    e.add_declaration("wifi_include", "#include <WiFi.h>");
    require_serial(e);
    e.add_init_line(format!("WiFi.begin({}, {});", ssid, password));
    e.add_init_line("while (WiFi.status() != WL_CONNECTED) { delay(500); Serial.print('.'); }");
    e.add_init_line(format!("Serial.println({});", quote_cpp("\nWiFi connected")));
    Ok(String::new())
}

fn http_get(node: &Node, e: &mut Emitter<'_>) -> Result<String, CompileError> {
    let url = quote_cpp(e.field(node, "URL")?);
    let var = e.field(node, "VAR")?;

    e.add_declaration("wifi_include", "#include <WiFi.h>");
    e.add_declaration("http_include", "#include <HTTPClient.h>");
    require_serial(e);

    let mut out = SketchEmitter::new(e.indent_unit());
    out.block("", |s| {
        s.line("HTTPClient http;");
        s.linef(format_args!("http.begin({});", url));
        s.line("int httpCode = http.GET();");
        s.block("if (httpCode > 0)", |s| {
            s.linef(format_args!("String {} = http.getString();", var));
            s.linef(format_args!("Serial.println({});", var));
        });
        s.line("http.end();");
    });
    Ok(out.finish())
}
