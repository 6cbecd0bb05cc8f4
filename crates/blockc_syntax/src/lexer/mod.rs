//! Lexer for block-tree documents.
//!
//! Handles the XML subset the block editor writes:
//! - start/end/self-closing tags with single- or double-quoted attributes
//! - character data with the five predefined entities and numeric character references
//! - `<![CDATA[…]]>` sections (emitted as text)
//! - comments, processing instructions (`<?xml …?>`) and `<!DOCTYPE …>`, which are skipped
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, Attribute)

pub mod tokens;

pub use tokens::{Attribute, Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;

/// Tokenize a document.
///
/// The token stream always ends with an `Eof` token.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(source).tokenize()
}

/// Lexer for tree documents.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.pos, self.pos)));
        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: char, expected: &str) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(SyntaxError::unexpected_char(c, expected, self.pos)),
            None => Err(SyntaxError::eof(expected, self.pos)),
        }
    }

    /// Skip past `terminator`, failing with an unterminated-`what` error that points at `start`.
    fn skip_until(&mut self, terminator: &str, what: &'static str, start: usize) -> Result<&'a str, SyntaxError> {
        match self.rest().find(terminator) {
            Some(offset) => {
                let body = &self.rest()[..offset];
                self.pos += offset + terminator.len();
                Ok(body)
            }
            None => Err(SyntaxError::Unterminated {
                what,
                span: Span::new(start, self.source.len()).into(),
            }),
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        if self.eat("<!--") {
            self.skip_until("-->", "comment", start)?;
        } else if self.eat("<![CDATA[") {
            let body = self.skip_until("]]>", "CDATA section", start)?;
            self.push(TokenKind::Text(body.to_string()), start);
        } else if self.eat("<?") {
            self.skip_until("?>", "processing instruction", start)?;
        } else if self.eat("<!") {
            self.skip_until(">", "declaration", start)?;
        } else if self.eat("</") {
            let name = self.scan_name()?;
            self.skip_whitespace();
            self.expect('>', "`>` to close the end tag")?;
            self.push(TokenKind::EndTag { name }, start);
        } else if self.eat("<") {
            self.scan_start_tag(start)?;
        } else {
            self.scan_text(start)?;
        }
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.pos)));
    }

    fn scan_name(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_name_start(c) => {
                self.advance();
            }
            Some(c) => return Err(SyntaxError::unexpected_char(c, "a name", self.pos)),
            None => return Err(SyntaxError::eof("a name", self.pos)),
        }
        while self.peek().is_some_and(is_name_char) {
            self.advance();
        }
        Ok(self.source[start..self.pos].to_string())
    }

    fn scan_start_tag(&mut self, start: usize) -> Result<(), SyntaxError> {
        let name = self.scan_name()?;
        let mut attributes: Vec<Attribute> = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat("/>") {
                self.push(
                    TokenKind::StartTag {
                        name,
                        attributes,
                        self_closing: true,
                    },
                    start,
                );
                return Ok(());
            }
            if self.eat(">") {
                self.push(
                    TokenKind::StartTag {
                        name,
                        attributes,
                        self_closing: false,
                    },
                    start,
                );
                return Ok(());
            }
            if self.is_at_end() {
                return Err(SyntaxError::Unterminated {
                    what: "start tag",
                    span: Span::new(start, self.pos).into(),
                });
            }

            let attr = self.scan_attribute()?;
            if attributes.iter().any(|a| a.name == attr.name) {
                return Err(SyntaxError::DuplicateAttribute {
                    name: attr.name,
                    span: attr.span.into(),
                });
            }
            attributes.push(attr);
        }
    }

    fn scan_attribute(&mut self) -> Result<Attribute, SyntaxError> {
        let start = self.pos;
        let name = self.scan_name()?;
        self.skip_whitespace();
        self.expect('=', "`=` after the attribute name")?;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            Some(c) => return Err(SyntaxError::unexpected_char(c, "a quoted attribute value", self.pos)),
            None => return Err(SyntaxError::eof("a quoted attribute value", self.pos)),
        };
        self.advance();
        let value_start = self.pos;
        let Some(len) = self.rest().find(quote) else {
            return Err(SyntaxError::Unterminated {
                what: "attribute value",
                span: Span::new(start, self.source.len()).into(),
            });
        };
        let raw = &self.rest()[..len];
        if let Some(offset) = raw.find('<') {
            return Err(SyntaxError::unexpected_char('<', "attribute text", value_start + offset));
        }
        let value = decode_entities(raw, value_start)?;
        self.pos += len + quote.len_utf8();

        Ok(Attribute {
            name,
            value,
            span: Span::new(start, self.pos),
        })
    }

    fn scan_text(&mut self, start: usize) -> Result<(), SyntaxError> {
        let len = self.rest().find('<').unwrap_or(self.rest().len());
        let raw = &self.rest()[..len];
        let text = decode_entities(raw, start)?;
        self.pos += len;
        self.push(TokenKind::Text(text), start);
        Ok(())
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_alphanumeric() || c == '-' || c == '.'
}

/// Decode character references in `raw`, which starts at byte `base` of the document.
fn decode_entities(raw: &str, base: usize) -> Result<String, SyntaxError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let at = base + (raw.len() - rest.len()) + amp;
        let after = &rest[amp + 1..];
        let end = after
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .filter(|&i| after[i..].starts_with(';'));
        let Some(end) = end else {
            let entity: String = after.chars().take_while(|c| !c.is_whitespace() && *c != '&').collect();
            return Err(SyntaxError::InvalidEntity {
                span: Span::new(at, at + 1 + entity.len()).into(),
                entity,
            });
        };
        let entity = &after[..end];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric(entity),
        };
        match decoded {
            Some(c) => out.push(c),
            None => {
                return Err(SyntaxError::InvalidEntity {
                    entity: entity.to_string(),
                    span: Span::new(at, at + end + 2).into(),
                });
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn decode_numeric(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
