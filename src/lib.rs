#![forbid(unsafe_code)]
//! blockc: compiles block-editor program trees into Arduino sketches.
//!
//! The editor saves a program as a tree document (`<xml><block type="…">…</xml>`).
//! This crate parses that document (through [`blockc_syntax`]), walks the tree
//! with a registry of block generators, and assembles a single-file C++ sketch
//! with `setup()` and `loop()` for ESP32-class boards.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//!
//! ```
//! let doc = r#"<xml><block type="delay_ms"><field name="MS">100</field></block></xml>"#;
//! let sketch = blockc::compile_document(doc).unwrap();
//! assert!(sketch.ends_with("void loop() {\n  delay(100);\n}\n"));
//! ```

pub mod backend;
pub mod cli;
pub mod project;
pub mod version;

pub use backend::{CompileError, Compiler, GenerationContext, GeneratorConfig, Registry, compile};
pub use blockc_syntax::{Node, SyntaxError, Workspace, parse_document, write_document};
pub use project::{FlashRequest, ProjectRecord};

use miette::Diagnostic;
use thiserror::Error;

/// Any failure on the way from document text to sketch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),
}

/// Parse a tree document and compile it with the built-in blocks and default settings.
pub fn compile_document(source: &str) -> Result<String, Error> {
    compile_document_with(source, &GeneratorConfig::default())
}

/// Parse a tree document and compile it with the built-in blocks and `config`.
pub fn compile_document_with(source: &str, config: &GeneratorConfig) -> Result<String, Error> {
    let workspace = parse_document(source)?;
    let sketch = Compiler::new(backend::arduino_registry())
        .with_config(config.clone())
        .compile(&workspace)?;
    Ok(sketch)
}
