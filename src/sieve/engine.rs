//! Predicate evaluation and value-domain extraction.
//!
//! The engine is generic over the record type. Callers supply an accessor
//! `(record, field) -> Option<String>` so the engine never needs to know what a
//! record looks like; an absent field reads as the empty string.

use std::collections::BTreeSet;

use crate::error::{Result, SieveError};
use crate::model::Condition;
use crate::operators::get_operator;

/// Return the records that satisfy every condition, in their original order.
///
/// With no conditions every record is returned. A condition naming an operator
/// the registry does not know never matches, so its records are excluded.
pub fn apply_filters<'r, T, F>(records: &'r [T], conditions: &[Condition], accessor: F) -> Vec<&'r T>
where
    F: Fn(&T, &str) -> Option<String>,
{
    if conditions.is_empty() {
        return records.iter().collect();
    }

    for condition in conditions {
        if get_operator(&condition.operator).is_none() {
            tracing::warn!(
                operator = %condition.operator,
                field = %condition.field,
                "Unknown operator, condition will not match"
            );
        }
    }

    records
        .iter()
        .filter(|record| {
            conditions
                .iter()
                .all(|condition| condition_matches(*record, condition, &accessor))
        })
        .collect()
}

/// Evaluate a single condition against one record.
pub fn condition_matches<T, F>(record: &T, condition: &Condition, accessor: &F) -> bool
where
    F: Fn(&T, &str) -> Option<String>,
{
    let Some(op) = get_operator(&condition.operator) else {
        return false;
    };
    let value = accessor(record, &condition.field).unwrap_or_default();
    op.matches(&value, &condition.value)
}

/// Distinct values `field` takes across `records`, skipping absent ones.
///
/// The set is ordered, so iterating it yields values ready for a selector.
pub fn unique_values<T, F>(records: &[T], field: &str, accessor: F) -> BTreeSet<String>
where
    F: Fn(&T, &str) -> Option<String>,
{
    records
        .iter()
        .filter_map(|record| accessor(record, field))
        .collect()
}

/// Reject conditions naming operators the registry does not know.
pub fn validate_conditions(conditions: &[Condition]) -> Result<()> {
    match conditions
        .iter()
        .find(|c| get_operator(&c.operator).is_none())
    {
        Some(bad) => Err(SieveError::UnknownOperator(bad.operator.clone())),
        None => Ok(()),
    }
}
