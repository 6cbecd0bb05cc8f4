//! Per-run accumulators for sketch-level declarations and setup lines.
//!
//! Generators register what they need while the tree is walked; the assembler
//! reads both collections back in first-insertion order.

use indexmap::{IndexMap, IndexSet};

/// Declarations and init lines collected during one compilation.
///
/// A context belongs to exactly one run. Create a new one (or [`reset`](Self::reset)
/// an old one) before compiling another tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationContext {
    declarations: IndexMap<String, String>,
    init_lines: IndexSet<String>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty both collections.
    pub fn reset(&mut self) {
        self.declarations.clear();
        self.init_lines.clear();
    }

    /// Record a top-of-file declaration under `key`. The first text stored for a
    /// key wins; later calls with the same key are ignored.
    pub fn add_declaration(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.declarations.entry(key.into()).or_insert_with(|| text.into());
    }

    /// Record a line for the setup routine. Identical text is kept once, at the
    /// position of its first insertion.
    pub fn add_init_line(&mut self, text: impl Into<String>) {
        self.init_lines.insert(text.into());
    }

    pub fn declarations(&self) -> impl Iterator<Item = &str> {
        self.declarations.values().map(String::as_str)
    }

    pub fn declaration(&self, key: &str) -> Option<&str> {
        self.declarations.get(key).map(String::as_str)
    }

    pub fn init_lines(&self) -> impl Iterator<Item = &str> {
        self.init_lines.iter().map(String::as_str)
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    pub fn init_line_count(&self) -> usize {
        self.init_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.init_lines.is_empty()
    }
}
