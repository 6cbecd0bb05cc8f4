#![no_main]

use libfuzzer_sys::fuzz_target;
use blockc::{parse_document, write_document};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that parses must survive a canonical rewrite unchanged
        if let Ok(workspace) = parse_document(s) {
            let canonical = write_document(&workspace);
            assert_eq!(parse_document(&canonical).ok(), Some(workspace));
        }
    }
});
