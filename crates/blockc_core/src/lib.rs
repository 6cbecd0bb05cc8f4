//! Provide the shared, pure vocabulary of the blockc compiler.
//!
//! This crate is intentionally small and dependency-free. It holds the facts about the *target* language (Arduino
//! C++) that both the tree frontend and the backend need to agree on:
//! - binding strengths used for expression parenthesization ([`lang::order`]),
//! - the comparison and logic operators blocks can select ([`lang::operators`]),
//! - C++ keywords and identifier rules ([`lang::cpp_keywords`], [`strings`]),
//! - board constants such as the usable pin range ([`lang::board`]).
//!
//! ## Notes
//!
//! - No IO, no global state, and no compiler-specific types live here.

pub mod lang;
pub mod strings;
