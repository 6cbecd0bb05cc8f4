//! C++ keyword vocabulary (for validating identifiers that end up in generated sketches).

/// Reserved keywords in C++ (plus the alternative operator spellings).
pub const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break", "case", "catch", "char",
    "char16_t", "char32_t", "char8_t", "class", "compl", "concept", "const", "consteval", "constexpr", "constinit",
    "const_cast", "continue", "co_await", "co_return", "co_yield", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator", "or",
    "or_eq", "private", "protected", "public", "register", "reinterpret_cast", "requires", "return", "short",
    "signed", "sizeof", "static", "static_assert", "static_cast", "struct", "switch", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual",
    "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Names the generated sketch itself declares; user variables must not shadow them.
pub const SKETCH_RESERVED: &[&str] = &["setup", "loop", "http", "httpCode", "SerialBT", "Serial", "WiFi", "String"];

/// Check whether an identifier is a C++ keyword.
pub fn is_keyword(name: &str) -> bool {
    CPP_KEYWORDS.contains(&name)
}

/// Check whether an identifier collides with a keyword or a name the sketch reserves.
pub fn is_reserved(name: &str) -> bool {
    is_keyword(name) || SKETCH_RESERVED.contains(&name)
}
