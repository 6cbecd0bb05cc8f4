//! Binding strengths for generated C++ expressions.
//!
//! Every expression block reports the strength of the operator at the root of the text it produced. A caller that
//! embeds that text requests the strength its syntactic position can accept; if the child binds looser than
//! requested, the child is wrapped in parentheses.
//!
//! ## Notes
//! - Lower values bind tighter. [`Order::ATOMIC`] needs no parentheses anywhere.
//! - [`Order::NONE`] is the loosest value: as a child strength it means "always wrap", as a required strength it
//!   means "never wrap" (e.g. a function argument or an `if` condition).
//!
//! ## Examples
//! ```rust
//! use blockc_core::lang::order::Order;
//!
//! assert!(Order::LOGICAL_OR.needs_parens_in(Order::LOGICAL_AND));
//! assert!(!Order::ATOMIC.needs_parens_in(Order::ATOMIC));
//! ```

use std::fmt;

/// Binding strength of an expression (lower = tighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order(pub u8);

impl Order {
    pub const ATOMIC: Order = Order(0);
    /// `x++`, `f(x)`, `a[i]`, `a.b`
    pub const UNARY_POSTFIX: Order = Order(1);
    /// `-x`, `!x`, `~x`
    pub const UNARY_PREFIX: Order = Order(2);
    pub const MULTIPLICATIVE: Order = Order(3);
    pub const ADDITIVE: Order = Order(4);
    pub const SHIFT: Order = Order(5);
    pub const RELATIONAL: Order = Order(6);
    pub const EQUALITY: Order = Order(7);
    pub const BITWISE_AND: Order = Order(8);
    pub const BITWISE_XOR: Order = Order(9);
    pub const BITWISE_OR: Order = Order(10);
    pub const LOGICAL_AND: Order = Order(11);
    pub const LOGICAL_OR: Order = Order(12);
    pub const CONDITIONAL: Order = Order(13);
    pub const ASSIGNMENT: Order = Order(14);
    pub const NONE: Order = Order(99);

    /// Whether an expression of this strength must be parenthesized where `required` is demanded.
    pub fn needs_parens_in(self, required: Order) -> bool {
        self > required
    }

    /// Wrap `code` in parentheses if this strength binds looser than `required`.
    pub fn wrap(self, code: String, required: Order) -> String {
        if self.needs_parens_in(required) {
            format!("({})", code)
        } else {
            code
        }
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::NONE
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
