//! Operator registry.
//!
//! Every comparison a [`Condition`](crate::model::Condition) can name lives in
//! [`OPERATORS`]. Each entry pairs a stable id (the value stored in saved views)
//! with a display label and a total evaluation function. Evaluation functions
//! always take the record's value first and the operand second.
//!
//! String operators compare case-insensitively. The numeric operators parse
//! both sides as `f64` and never match when either side fails to parse.

pub const CONTAINS: &str = "contains";
pub const EQUALS: &str = "equals";
pub const STARTS_WITH: &str = "startsWith";
pub const ENDS_WITH: &str = "endsWith";
pub const GREATER_THAN: &str = "greaterThan";
pub const LESS_THAN: &str = "lessThan";

/// Specification for a single operator.
#[derive(Clone, Copy)]
pub struct OperatorSpec {
    /// Stable identifier, persisted in saved views
    pub id: &'static str,
    /// Human readable label for selectors
    pub label: &'static str,
    /// `(field_value, operand) -> matches`
    pub eval: fn(&str, &str) -> bool,
}

impl OperatorSpec {
    const fn new(id: &'static str, label: &'static str, eval: fn(&str, &str) -> bool) -> Self {
        Self { id, label, eval }
    }

    pub fn matches(&self, field_value: &str, operand: &str) -> bool {
        (self.eval)(field_value, operand)
    }
}

impl std::fmt::Debug for OperatorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorSpec")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

/// Registry of all supported operators, in selector display order.
pub const OPERATORS: &[OperatorSpec] = &[
    OperatorSpec::new(CONTAINS, "Contains", contains),
    OperatorSpec::new(EQUALS, "Equals", equals),
    OperatorSpec::new(STARTS_WITH, "Starts with", starts_with),
    OperatorSpec::new(ENDS_WITH, "Ends with", ends_with),
    OperatorSpec::new(GREATER_THAN, "Greater than", greater_than),
    OperatorSpec::new(LESS_THAN, "Less than", less_than),
];

/// Look up an operator by id.
pub fn get_operator(id: &str) -> Option<&'static OperatorSpec> {
    OPERATORS.iter().find(|op| op.id == id)
}

/// All operator ids, in display order.
pub fn operator_ids() -> impl Iterator<Item = &'static str> {
    OPERATORS.iter().map(|op| op.id)
}

fn contains(value: &str, operand: &str) -> bool {
    value.to_lowercase().contains(&operand.to_lowercase())
}

fn equals(value: &str, operand: &str) -> bool {
    value.to_lowercase() == operand.to_lowercase()
}

fn starts_with(value: &str, operand: &str) -> bool {
    value.to_lowercase().starts_with(&operand.to_lowercase())
}

fn ends_with(value: &str, operand: &str) -> bool {
    value.to_lowercase().ends_with(&operand.to_lowercase())
}

fn parse_pair(value: &str, operand: &str) -> Option<(f64, f64)> {
    let value = value.trim().parse::<f64>().ok()?;
    let operand = operand.trim().parse::<f64>().ok()?;
    Some((value, operand))
}

fn greater_than(value: &str, operand: &str) -> bool {
    parse_pair(value, operand).is_some_and(|(v, o)| v > o)
}

fn less_than(value: &str, operand: &str) -> bool {
    parse_pair(value, operand).is_some_and(|(v, o)| v < o)
}
