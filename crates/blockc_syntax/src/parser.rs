//! Parser for block-tree documents.
//!
//! Parsing happens in two passes:
//! 1. [`elements`] folds the token stream into a generic element tree.
//! 2. [`blocks`] interprets that element tree as a [`Workspace`] of block chains.
//!
//! ## Notes
//! - Neither pass recurses along `<next>` chains, so long programs do not grow the call stack.
//! - Blocks plugged into inputs do recurse; nesting deeper than [`MAX_NESTING`] is rejected.

mod blocks;
mod elements;

#[cfg(test)]
mod tests;

pub use elements::{Content, Element};

use crate::ast::Workspace;
use crate::diagnostics::SyntaxError;
use crate::lexer::{self, Token};

/// Deepest input nesting a document may use (a block inside an input inside a block ...).
pub const MAX_NESTING: usize = 512;

/// Parse a token stream into a [`Workspace`].
///
/// ## Errors
/// Returns the first [`SyntaxError`] encountered.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Workspace, SyntaxError> {
    let root = elements::build_tree(tokens)?;
    let workspace = blocks::build_workspace(&root)?;
    tracing::debug!(top_level = workspace.blocks.len(), "parsed workspace");
    Ok(workspace)
}

/// Lex and parse a document in one step.
pub fn parse_document(source: &str) -> Result<Workspace, SyntaxError> {
    let tokens = lexer::lex(source)?;
    parse(&tokens)
}
