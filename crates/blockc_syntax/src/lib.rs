//! Block-tree document frontend for blockc: lexer, parser, tree, writer, diagnostics.
//!
//! The block editor persists a program as an XML document. This crate turns that document into the in-memory
//! [`ast::Workspace`] the compiler walks, and writes a workspace back out in canonical form.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not know which block types exist or what their fields mean. That lives in
//!   the compiler's node registry.
//! - Parsing and writing are lossless for everything the tree models: `parse(write(ws)) == ws`.
//!
//! ## Examples
//! ```rust
//! use blockc_syntax::{parse_document, write_document};
//!
//! let doc = r#"<xml><block type="delay_ms"><field name="MS">500</field></block></xml>"#;
//! let workspace = parse_document(doc).unwrap();
//! assert_eq!(workspace.blocks[0].field("MS"), Some("500"));
//! assert!(write_document(&workspace).contains(r#"<field name="MS">500</field>"#));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod writer;

pub use ast::{Input, InputKind, Mutation, Node, Span, Workspace};
pub use diagnostics::SyntaxError;
pub use parser::{MAX_NESTING, parse_document};
pub use writer::write_document;
