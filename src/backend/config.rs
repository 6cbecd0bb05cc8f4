//! Code-generation configuration.
//!
//! The defaults produce the sketch layout the Arduino IDE expects: two-space
//! indentation, `setup`/`loop` entry points, and a placeholder comment in an
//! empty loop.

/// Settings that shape the assembled sketch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Line written into `loop()` when the program has no statements
    pub loop_placeholder: String,
    /// Name of the one-time initialization routine
    pub setup_name: String,
    /// Name of the repeating routine
    pub loop_name: String,
    /// Maximum nesting of blocks inside blocks
    pub max_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            loop_placeholder: "// loop body".to_string(),
            setup_name: "setup".to_string(),
            loop_name: "loop".to_string(),
            max_depth: 256,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the empty-loop placeholder line
    pub fn with_loop_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.loop_placeholder = placeholder.into();
        self
    }

    /// Rename the two entry points
    pub fn with_entry_points(mut self, setup: impl Into<String>, main_loop: impl Into<String>) -> Self {
        self.setup_name = setup.into();
        self.loop_name = main_loop.into();
        self
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// One level of indentation as a string.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}
