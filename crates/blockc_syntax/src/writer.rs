//! Canonical writer for block-tree documents.
//!
//! Output is two-space indented, one element per line, with children in the order mutation, fields, inputs, next.
//! Reading the output back with [`crate::parse_document`] yields an equal [`Workspace`].
//!
//! Indentation stops growing after [`MAX_INDENT_LEVELS`] levels so a long chain of `<next>` elements stays linear in
//! size.

use std::fmt::Write;

use indexmap::IndexMap;

use crate::ast::{Node, Workspace};

const INDENT: &str = "  ";

/// Deepest indentation the writer emits.
pub const MAX_INDENT_LEVELS: usize = 32;

/// Serialize a workspace to its canonical document text.
pub fn write_document(workspace: &Workspace) -> String {
    let mut w = DocWriter::default();
    let root = open_tag("xml", None, &workspace.attributes);
    if workspace.blocks.is_empty() {
        w.line(&format!("{}</xml>", root));
    } else {
        w.line(&root);
        w.indent += 1;
        for block in &workspace.blocks {
            w.node(block);
        }
        w.indent -= 1;
        w.line("</xml>");
    }
    w.out
}

#[derive(Default)]
struct DocWriter {
    out: String,
    indent: usize,
}

impl DocWriter {
    fn line(&mut self, s: &str) {
        for _ in 0..self.indent.min(MAX_INDENT_LEVELS) {
            self.out.push_str(INDENT);
        }
        self.out.push_str(s);
        self.out.push('\n');
    }

    /// Write a block and every block chained after it.
    ///
    /// Iterates the chain instead of recursing along `next`; each open `<next>` is closed on the way out.
    fn node(&mut self, first: &Node) {
        let mut pending: Vec<&'static str> = Vec::new();
        for node in first.iter_chain() {
            let tag = if node.shadow { "shadow" } else { "block" };
            let open = open_tag(tag, Some(&node.type_id), &node.attributes);
            let has_children =
                node.mutation.is_some() || !node.fields.is_empty() || !node.inputs.is_empty() || node.next.is_some();
            if !has_children {
                self.line(&format!("{}</{}>", open, tag));
                continue;
            }

            self.line(&open);
            self.indent += 1;
            self.body(node);
            if node.next.is_some() {
                self.line("<next>");
                self.indent += 1;
                pending.push(tag);
            } else {
                self.indent -= 1;
                self.line(&format!("</{}>", tag));
            }
        }
        while let Some(tag) = pending.pop() {
            self.indent -= 1;
            self.line("</next>");
            self.indent -= 1;
            self.line(&format!("</{}>", tag));
        }
    }

    fn body(&mut self, node: &Node) {
        if let Some(mutation) = &node.mutation {
            self.line(&format!("{}</mutation>", open_tag("mutation", None, &mutation.attributes)));
        }
        for (name, text) in &node.fields {
            self.line(&format!(
                "<field name=\"{}\">{}</field>",
                escape_attr(name),
                escape_text(text)
            ));
        }
        for (name, input) in &node.inputs {
            let tag = input.kind.tag();
            let open = format!("<{} name=\"{}\">", tag, escape_attr(name));
            if input.shadow.is_none() && input.block.is_none() {
                self.line(&format!("{}</{}>", open, tag));
                continue;
            }
            self.line(&open);
            self.indent += 1;
            if let Some(shadow) = &input.shadow {
                self.node(shadow);
            }
            if let Some(block) = &input.block {
                self.node(block);
            }
            self.indent -= 1;
            self.line(&format!("</{}>", tag));
        }
    }
}

fn open_tag(name: &str, type_id: Option<&str>, attributes: &IndexMap<String, String>) -> String {
    let mut tag = format!("<{}", name);
    if let Some(type_id) = type_id {
        let _ = write!(tag, " type=\"{}\"", escape_attr(type_id));
    }
    for (key, value) in attributes {
        let _ = write!(tag, " {}=\"{}\"", key, escape_attr(value));
    }
    tag.push('>');
    tag
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
    out
}
