//! Conversions between condition lists and [`FilterState`].
//!
//! The condition list is canonical. `FilterState` only keeps one value per
//! field and forgets operators, so going through it and back turns every
//! condition into a `contains` condition.

use crate::model::{Condition, FilterState};
use crate::operators::CONTAINS;

/// Fold conditions into a flat map. Later conditions on the same field win.
pub fn conditions_to_filter_state(conditions: &[Condition]) -> FilterState {
    conditions
        .iter()
        .map(|c| (c.field.clone(), c.value.clone()))
        .collect()
}

/// One `contains` condition per non-empty entry, in field order.
pub fn filter_state_to_conditions(state: &FilterState) -> Vec<Condition> {
    state
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| Condition::new(field.clone(), CONTAINS, value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::EQUALS;

    #[test]
    fn folds_conditions_into_map() {
        let state = conditions_to_filter_state(&[
            Condition::contains("name", "acme"),
            Condition::equals("source", "Website"),
        ]);
        assert_eq!(state.len(), 2);
        assert_eq!(state["name"], "acme");
        assert_eq!(state["source"], "Website");
    }

    #[test]
    fn duplicate_fields_last_write_wins() {
        let state = conditions_to_filter_state(&[
            Condition::contains("name", "first"),
            Condition::contains("name", "second"),
        ]);
        assert_eq!(state.len(), 1);
        assert_eq!(state["name"], "second");
    }

    #[test]
    fn empty_conditions_give_empty_state() {
        assert!(conditions_to_filter_state(&[]).is_empty());
    }

    #[test]
    fn state_becomes_contains_conditions_skipping_empty() {
        let mut state = FilterState::new();
        state.insert("source".into(), "web".into());
        state.insert("name".into(), "".into());
        state.insert("city".into(), "Berlin".into());

        let conditions = filter_state_to_conditions(&state);
        assert_eq!(
            conditions,
            vec![
                Condition::contains("city", "Berlin"),
                Condition::contains("source", "web"),
            ]
        );
    }

    #[test]
    fn round_trip_loses_operator() {
        let original = vec![Condition::new("source", EQUALS, "Website")];
        let back = filter_state_to_conditions(&conditions_to_filter_state(&original));
        assert_eq!(back, vec![Condition::contains("source", "Website")]);
        assert_ne!(back, original);
    }
}
