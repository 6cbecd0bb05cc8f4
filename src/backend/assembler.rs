//! Final sketch layout.
//!
//! ```text
//! <declarations, one per line>
//! <blank line, only if there were declarations>
//! void setup() {
//!   <init lines>
//! }
//!
//! void loop() {
//!   <main sequence, or the placeholder>
//! }
//! ```

use super::config::GeneratorConfig;
use super::context::GenerationContext;
use super::sketch_emitter::{SketchEmitter, trim_blank_lines};

/// Combine the main statement sequence and the collected context into a sketch.
pub fn assemble(main: &str, context: &GenerationContext, config: &GeneratorConfig) -> String {
    let mut out = SketchEmitter::new(config.indent_unit());

    for declaration in context.declarations() {
        out.lines(declaration);
    }
    if context.declaration_count() > 0 {
        out.blank_line();
    }

    out.function("void", &config.setup_name, |e| {
        for line in context.init_lines() {
            e.lines(line);
        }
    });
    out.blank_line();

    let body = trim_blank_lines(main);
    out.function("void", &config.loop_name, |e| {
        if body.is_empty() {
            e.line(&config.loop_placeholder);
        }
        for line in &body {
            e.line(line);
        }
    });

    out.finish()
}
