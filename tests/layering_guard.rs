//! Layering guardrails for the workspace crates.
//!
//! - `blockc_core` is the shared vocabulary and must stay dependency-free.
//! - `blockc_syntax` only knows documents; it must never depend on the compiler crate (`blockc`).
//!
//! These tests scan the crates' `Cargo.toml` files and fail if either rule is broken.

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            if line == "[dependencies]" {
                in_dependencies = true;
                continue;
            }
            // Any new section after `[dependencies]` ends the scan window.
            if in_dependencies {
                break;
            }
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = dependencies(include_str!("../crates/blockc_core/Cargo.toml"));
    assert!(deps.is_empty(), "`blockc_core` must stay dependency-free, found: {:?}", deps);
}

#[test]
fn syntax_does_not_depend_on_compiler() {
    let deps = dependencies(include_str!("../crates/blockc_syntax/Cargo.toml"));
    assert!(
        !deps.iter().any(|d| d == "blockc"),
        "`blockc_syntax` must not depend on the compiler crate"
    );
    assert!(deps.iter().any(|d| d == "indexmap"));
}

#[test]
fn compiler_uses_both_layers() {
    let deps = dependencies(include_str!("../Cargo.toml"));
    assert!(deps.iter().any(|d| d == "blockc_core"));
    assert!(deps.iter().any(|d| d == "blockc_syntax"));
}
