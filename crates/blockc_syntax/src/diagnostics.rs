//! Syntax errors for tree documents.
//!
//! Every variant carries the byte range it refers to so the CLI can render the offending part of the document with
//! `miette`.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// Error while reading a tree document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    #[error("unexpected end of document, expected {expected}")]
    #[diagnostic(code(blockc::syntax::eof))]
    UnexpectedEof {
        expected: String,
        #[label("document ends here")]
        span: SourceSpan,
    },

    #[error("unexpected character `{found}`, expected {expected}")]
    #[diagnostic(code(blockc::syntax::unexpected_char))]
    UnexpectedChar {
        found: char,
        expected: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unterminated {what}")]
    #[diagnostic(code(blockc::syntax::unterminated))]
    Unterminated {
        what: &'static str,
        #[label("starts here")]
        span: SourceSpan,
    },

    #[error("unknown character reference `&{entity};`")]
    #[diagnostic(
        code(blockc::syntax::entity),
        help("use one of &amp; &lt; &gt; &quot; &apos; or a numeric reference such as &#10;")
    )]
    InvalidEntity {
        entity: String,
        #[label("not a known entity")]
        span: SourceSpan,
    },

    #[error("closing tag `</{found}>` does not match `<{expected}>`")]
    #[diagnostic(code(blockc::syntax::mismatched_tag))]
    MismatchedTag {
        expected: String,
        found: String,
        #[label("expected `</{expected}>`")]
        span: SourceSpan,
    },

    #[error("element `<{name}>` is not allowed inside `<{parent}>`")]
    #[diagnostic(code(blockc::syntax::unexpected_element))]
    UnexpectedElement {
        name: String,
        parent: String,
        #[label("unexpected element")]
        span: SourceSpan,
    },

    #[error("text is not allowed inside `<{parent}>`")]
    #[diagnostic(code(blockc::syntax::unexpected_text))]
    UnexpectedText {
        parent: String,
        #[label("unexpected text")]
        span: SourceSpan,
    },

    #[error("`<{element}>` is missing the `{attribute}` attribute")]
    #[diagnostic(code(blockc::syntax::missing_attribute))]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        #[label("declared here")]
        span: SourceSpan,
    },

    #[error("attribute `{name}` is given more than once")]
    #[diagnostic(code(blockc::syntax::duplicate_attribute))]
    DuplicateAttribute {
        name: String,
        #[label("repeated here")]
        span: SourceSpan,
    },

    #[error("duplicate {what} `{name}`")]
    #[diagnostic(code(blockc::syntax::duplicate))]
    Duplicate {
        what: &'static str,
        name: String,
        #[label("already defined on this block")]
        span: SourceSpan,
    },

    #[error("`<{name}>` must contain a block")]
    #[diagnostic(code(blockc::syntax::empty_element))]
    EmptyElement {
        name: String,
        #[label("nothing connected here")]
        span: SourceSpan,
    },

    #[error("the document root must be `<xml>`, found `<{found}>`")]
    #[diagnostic(code(blockc::syntax::root))]
    InvalidRoot {
        found: String,
        #[label("root element")]
        span: SourceSpan,
    },

    #[error("blocks are nested more than {limit} inputs deep")]
    #[diagnostic(
        code(blockc::syntax::too_deep),
        help("split the expression into smaller pieces")
    )]
    TooDeep {
        limit: usize,
        #[label("nesting limit reached here")]
        span: SourceSpan,
    },

    #[error("content after the root element")]
    #[diagnostic(code(blockc::syntax::trailing))]
    TrailingContent {
        #[label("unexpected content")]
        span: SourceSpan,
    },
}

impl SyntaxError {
    /// Byte range the error points at.
    pub fn span(&self) -> SourceSpan {
        match self {
            SyntaxError::UnexpectedEof { span, .. }
            | SyntaxError::UnexpectedChar { span, .. }
            | SyntaxError::Unterminated { span, .. }
            | SyntaxError::InvalidEntity { span, .. }
            | SyntaxError::MismatchedTag { span, .. }
            | SyntaxError::UnexpectedElement { span, .. }
            | SyntaxError::UnexpectedText { span, .. }
            | SyntaxError::MissingAttribute { span, .. }
            | SyntaxError::DuplicateAttribute { span, .. }
            | SyntaxError::Duplicate { span, .. }
            | SyntaxError::EmptyElement { span, .. }
            | SyntaxError::InvalidRoot { span, .. }
            | SyntaxError::TooDeep { span, .. }
            | SyntaxError::TrailingContent { span } => *span,
        }
    }

    pub(crate) fn eof(expected: impl Into<String>, at: usize) -> Self {
        SyntaxError::UnexpectedEof {
            expected: expected.into(),
            span: Span::new(at, at).into(),
        }
    }

    pub(crate) fn unexpected_char(found: char, expected: impl Into<String>, at: usize) -> Self {
        SyntaxError::UnexpectedChar {
            found,
            expected: expected.into(),
            span: Span::new(at, at + found.len_utf8()).into(),
        }
    }
}
