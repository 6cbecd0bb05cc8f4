//! Errors raised while turning a block tree into sketch source.
//!
//! Every failure aborts the whole compilation; there is no partial output.

use miette::Diagnostic;
use thiserror::Error;

/// A fatal code-generation error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CompileError {
    /// The tree references a block type with no registered generator.
    #[error("no generator registered for block type `{type_id}`")]
    #[diagnostic(
        code(blockc::unknown_block),
        help("register a generator for `{type_id}` or remove the block from the program")
    )]
    UnknownNodeType { type_id: String },

    /// A field value is missing or falls outside its declared domain.
    #[error("invalid field `{field}` on block `{type_id}`: {reason}")]
    #[diagnostic(code(blockc::malformed_field))]
    MalformedField {
        type_id: String,
        field: String,
        reason: String,
    },

    /// The tree's shape does not fit the registry (wrong socket kind, undeclared
    /// inputs, nesting past the configured limit, ...).
    #[error("malformed block tree: {reason}")]
    #[diagnostic(code(blockc::malformed_tree))]
    MalformedTree { reason: String },

    /// A value socket without a default has nothing connected.
    #[error("block `{type_id}` needs a block in its `{input}` input")]
    #[diagnostic(code(blockc::missing_input))]
    MissingInput { type_id: String, input: String },
}

impl CompileError {
    pub fn unknown_node(type_id: &str) -> Self {
        Self::UnknownNodeType {
            type_id: type_id.to_string(),
        }
    }

    pub fn malformed_field(type_id: &str, field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            type_id: type_id.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed_tree(reason: impl Into<String>) -> Self {
        Self::MalformedTree { reason: reason.into() }
    }

    pub fn missing_input(type_id: &str, input: &str) -> Self {
        Self::MissingInput {
            type_id: type_id.to_string(),
            input: input.to_string(),
        }
    }
}
