//! Target-language vocabulary registries.
//!
//! Callers work with stable IDs (e.g. [`operators::OperatorId`]) and typed values (e.g. [`order::Order`]) instead of
//! comparing raw strings across the compiler.
//!
//! ## Examples
//! ```rust
//! use blockc_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_field("EQ"), Some(OperatorId::Eq));
//! assert_eq!(operators::info_for(OperatorId::Eq).symbol, "==");
//! ```

pub mod board;
pub mod cpp_keywords;
pub mod operators;
pub mod order;
