//! Operator vocabulary for comparison and logic blocks.
//!
//! The block editor stores the selected operator as a field value (`"EQ"`, `"AND"`, ...). This module maps those
//! field spellings to C++ symbols and binding strengths.
//!
//! ## Notes
//! - Lookup via [`from_field`] is **case-sensitive**, matching what the editor writes.

use super::order::Order;

/// Define which block family an operator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    Compare,
    Logic,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Comparison
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,

    // Logic
    And,
    Or,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    /// Field value written by the editor.
    pub field: &'static str,
    /// C++ spelling.
    pub symbol: &'static str,
    /// Strength of an expression rooted at this operator; also the strength requested for its operands.
    pub order: Order,
    pub family: OperatorFamily,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Eq, "EQ", "==", Order::EQUALITY, OperatorFamily::Compare),
    op(OperatorId::Neq, "NEQ", "!=", Order::EQUALITY, OperatorFamily::Compare),
    op(OperatorId::Lt, "LT", "<", Order::RELATIONAL, OperatorFamily::Compare),
    op(OperatorId::Lte, "LTE", "<=", Order::RELATIONAL, OperatorFamily::Compare),
    op(OperatorId::Gt, "GT", ">", Order::RELATIONAL, OperatorFamily::Compare),
    op(OperatorId::Gte, "GTE", ">=", Order::RELATIONAL, OperatorFamily::Compare),
    op(OperatorId::And, "AND", "&&", Order::LOGICAL_AND, OperatorFamily::Logic),
    op(OperatorId::Or, "OR", "||", Order::LOGICAL_OR, OperatorFamily::Logic),
];

/// Field values accepted by comparison blocks, in registry order.
pub const COMPARE_FIELDS: &[&str] = &["EQ", "NEQ", "LT", "LTE", "GT", "GTE"];

/// Field values accepted by logic blocks, in registry order.
pub const LOGIC_FIELDS: &[&str] = &["AND", "OR"];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve an editor field value to its operator identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_field(field: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.field == field).map(|o| o.id)
}

/// Iterate the operators belonging to a block family.
pub fn family(family: OperatorFamily) -> impl Iterator<Item = &'static OperatorInfo> {
    OPERATORS.iter().filter(move |o| o.family == family)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, field: &'static str, symbol: &'static str, order: Order, family: OperatorFamily) -> OperatorInfo {
    OperatorInfo {
        id,
        field,
        symbol,
        order,
        family,
    }
}
