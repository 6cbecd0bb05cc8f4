//! Token stream → generic element tree.

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
use crate::lexer::{Attribute, Token, TokenKind};

/// An element and everything between its start and end tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Content>,
    /// Span of the start tag.
    pub span: Span,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Tears the subtree down with an explicit stack; `<next>` nesting is as deep as the program is long.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Content::Element(mut element) = child {
                pending.append(&mut element.children);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Element(Element),
    Text { text: String, span: Span },
}

impl Content {
    /// Text that consists only of whitespace (formatting between elements).
    pub fn is_blank(&self) -> bool {
        matches!(self, Content::Text { text, .. } if text.trim().is_empty())
    }
}

/// Fold tokens into the single root element of the document.
pub fn build_tree(tokens: &[Token]) -> Result<Element, SyntaxError> {
    // Elements whose end tag has not been seen yet; the last one is the innermost.
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    for token in tokens {
        match &token.kind {
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if root.is_some() {
                    return Err(SyntaxError::TrailingContent {
                        span: token.span.into(),
                    });
                }
                let element = Element {
                    name: name.clone(),
                    attributes: attributes.clone(),
                    children: Vec::new(),
                    span: token.span,
                };
                if *self_closing {
                    close(element, &mut open, &mut root);
                } else {
                    open.push(element);
                }
            }
            TokenKind::EndTag { name } => {
                let Some(element) = open.pop() else {
                    return Err(SyntaxError::TrailingContent {
                        span: token.span.into(),
                    });
                };
                if element.name != *name {
                    return Err(SyntaxError::MismatchedTag {
                        expected: element.name.clone(),
                        found: name.clone(),
                        span: token.span.into(),
                    });
                }
                close(element, &mut open, &mut root);
            }
            TokenKind::Text(text) => match open.last_mut() {
                Some(parent) => {
                    // CDATA next to plain text arrives as separate tokens; keep them as one run.
                    if let Some(Content::Text { text: prev, span }) = parent.children.last_mut() {
                        prev.push_str(text);
                        *span = span.merge(token.span);
                    } else {
                        parent.children.push(Content::Text {
                            text: text.clone(),
                            span: token.span,
                        });
                    }
                }
                None if text.trim().is_empty() => {}
                None => {
                    return Err(SyntaxError::TrailingContent {
                        span: token.span.into(),
                    });
                }
            },
            TokenKind::Eof => {
                if let Some(unclosed) = open.last() {
                    return Err(SyntaxError::Unterminated {
                        what: "element",
                        span: unclosed.span.into(),
                    });
                }
            }
        }
    }

    root.ok_or_else(|| {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        SyntaxError::eof("a root element", end)
    })
}

fn close(element: Element, open: &mut [Element], root: &mut Option<Element>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Content::Element(element)),
        None => *root = Some(element),
    }
}
