//! String helpers shared by the frontend and backend.
//!
//! ## Notes
//! - [`quote_cpp`] produces a C/C++ narrow string literal. Non-ASCII text is emitted as UTF-8 bytes, which the
//!   Arduino toolchain accepts.

use crate::lang::cpp_keywords;

/// Quote `text` as a C++ string literal, escaping characters that would end or corrupt it.
///
/// ## Examples
/// ```rust
/// use blockc_core::strings::quote_cpp;
///
/// assert_eq!(quote_cpp("say \"hi\""), r#""say \"hi\"""#);
/// assert_eq!(quote_cpp(""), r#""""#);
/// ```
pub fn quote_cpp(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            // Keep `??x` from forming a trigraph on older toolchains.
            '?' if out.ends_with('?') => out.push_str("\\?"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}\"\"", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Check whether `name` is a valid C identifier (ASCII letter or `_`, then letters, digits, `_`).
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check whether `name` may be used as a variable in a generated sketch.
pub fn is_usable_identifier(name: &str) -> bool {
    is_c_identifier(name) && !cpp_keywords::is_reserved(name)
}
