//! Sketch backend
//!
//! This module turns a parsed block tree into Arduino C++ source.
//!
//! The pipeline is:
//! 1. Each run gets a fresh [`Emitter`] (and with it a fresh [`GenerationContext`])
//! 2. The emitter walks every top-level chain, dispatching on block type through the [`Registry`]
//! 3. The assembler wraps the main sequence and the collected declarations/init lines into
//!    `setup()`/`loop()`
//!
//! ## Module Organization
//!
//! - `registry.rs` - Block schemas, field domains and generator lookup
//! - `emitter.rs` - Tree walking, precedence-aware parenthesization, socket defaults
//! - `context.rs` - Per-run declaration and init-line accumulators
//! - `assembler.rs` - Final sketch layout
//! - `sketch_emitter.rs` - Low-level indented text builder
//! - `blocks/` - The built-in Arduino/ESP32 block generators
//! - `config.rs` - Generator settings
//! - `errors.rs` - Compile errors

// No panicking on untrusted trees
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod assembler;
pub mod blocks;
pub mod config;
pub mod context;
pub mod emitter;
pub mod errors;
pub mod registry;
pub mod sketch_emitter;

use std::sync::OnceLock;

use blockc_syntax::Workspace;
use tracing::debug;

pub use config::GeneratorConfig;
pub use context::GenerationContext;
pub use emitter::Emitter;
pub use errors::CompileError;
pub use registry::{FieldDomain, FieldSpec, Generator, InputSpec, NodeDef, NodeKind, NodeSchema, Registry};

/// The built-in block set, built once and shared.
pub fn arduino_registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::arduino)
}

/// Compiles block trees against a registry.
///
/// ## Examples
///
/// ```
/// use blockc::backend::{Compiler, Registry};
/// use blockc_syntax::{Node, Workspace};
///
/// let registry = Registry::arduino();
/// let tree = Workspace::with_chain(Node::new("delay_ms").with_field("MS", "250"));
/// let sketch = Compiler::new(&registry).compile(&tree).unwrap();
/// assert!(sketch.contains("  delay(250);\n"));
/// ```
#[derive(Debug, Clone)]
pub struct Compiler<'r> {
    registry: &'r Registry,
    config: GeneratorConfig,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a complete sketch. Any error aborts the run.
    #[tracing::instrument(skip_all, fields(top_level = workspace.blocks.len()))]
    pub fn compile(&self, workspace: &Workspace) -> Result<String, CompileError> {
        let mut emitter = Emitter::new(self.registry, &self.config);
        let main = emitter.emit_workspace(workspace)?;
        let context = emitter.finish();
        debug!(
            declarations = context.declaration_count(),
            init_lines = context.init_line_count(),
            "collected sketch context"
        );
        Ok(assembler::assemble(&main, &context, &self.config))
    }
}

/// Compile with the built-in block set and default settings.
pub fn compile(workspace: &Workspace) -> Result<String, CompileError> {
    Compiler::new(arduino_registry()).compile(workspace)
}
