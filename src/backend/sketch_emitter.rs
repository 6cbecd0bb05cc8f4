//! Sketch emitter - builds C++ source text line by line
//!
//! Used by the assembler for the final sketch layout and by generators that
//! produce multi-line fragments (braced scopes, `if` chains).

use std::fmt::Write;

/// A buffer for building sketch source with consistent indentation.
///
/// Blank lines are never indented.
#[derive(Debug, Clone, Default)]
pub struct SketchEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: String,
}

impl SketchEmitter {
    pub fn new(indent_str: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: indent_str.into(),
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        if !s.trim().is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
    }

    /// Write every line of a possibly multi-line fragment at the current indentation
    pub fn lines(&mut self, text: &str) {
        for l in text.lines() {
            self.line(l);
        }
    }

    /// Write formatted text as one line
    pub fn linef(&mut self, args: std::fmt::Arguments<'_>) {
        self.write_indent();
        let _ = self.buffer.write_fmt(args);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent_str);
        }
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a block with braces
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(&format!("{} {{", header));
        }
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }

    /// Write a function definition with no parameters
    pub fn function<F>(&mut self, return_type: &str, name: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.block(&format!("{} {}()", return_type, name), f);
    }

    /// Write a comment
    pub fn comment(&mut self, text: &str) {
        self.line(&format!("// {}", text));
    }
}

/// Prefix every non-blank line of `text` with `unit`.
pub fn indent_lines(text: &str, unit: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for l in text.lines() {
        if !l.trim().is_empty() {
            out.push_str(unit);
            out.push_str(l);
        }
        out.push('\n');
    }
    out
}

/// Drop blank lines from both ends of `text`, keeping interior ones.
pub fn trim_blank_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return Vec::new();
    };
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(start, |i| i + 1);
    lines[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_block() {
        let mut e = SketchEmitter::new("  ");
        e.function("void", "setup", |e| {
            e.line("pinMode(2, OUTPUT);");
            e.block("if (x)", |e| e.comment("nothing"));
        });
        assert_eq!(
            e.finish(),
            "void setup() {\n  pinMode(2, OUTPUT);\n  if (x) {\n    // nothing\n  }\n}\n"
        );
    }

    #[test]
    fn test_bare_scope_and_blank_lines() {
        let mut e = SketchEmitter::new("    ");
        e.block("", |e| {
            e.line("int a = 1;");
            e.line("");
            e.linef(format_args!("int b = {};", 2));
        });
        assert_eq!(e.as_str(), "{\n    int a = 1;\n\n    int b = 2;\n}\n");
    }

    #[test]
    fn test_lines_reindents_fragment() {
        let mut e = SketchEmitter::new("  ");
        e.indent();
        e.lines("a;\n{\n  b;\n}\n");
        assert_eq!(e.finish(), "  a;\n  {\n    b;\n  }\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut e = SketchEmitter::new("  ");
        e.dedent();
        e.line("x");
        assert_eq!(e.finish(), "x\n");
    }

    #[test]
    fn test_indent_lines_skips_blank() {
        assert_eq!(indent_lines("a;\n\nb;\n", "  "), "  a;\n\n  b;\n");
        assert_eq!(indent_lines("", "  "), "");
    }

    #[test]
    fn test_trim_blank_lines() {
        assert_eq!(trim_blank_lines("\n  \na;\n\nb;\n\n"), vec!["a;", "", "b;"]);
        assert!(trim_blank_lines("\n \n").is_empty());
        assert!(trim_blank_lines("").is_empty());
    }
}
