//! # Filter Session
//!
//! A [`FilterSession`] is the state a filter editor works on: the columns of the
//! table being filtered and the condition list under construction. It keeps the
//! edit rules in one place:
//!
//! - a condition's field must be one of the filterable (non-numeric) columns
//! - changing a condition's field or operator clears its value, so a value typed
//!   for one pairing never silently applies to another
//! - only registry operators can be selected
//!
//! Evaluation and persistence are delegated to [`crate::engine`] and
//! [`crate::commands::views`].

use std::collections::BTreeSet;

use crate::codec::conditions_to_filter_state;
use crate::commands::views::check_save;
use crate::engine::{apply_filters, unique_values};
use crate::error::{Result, SieveError};
use crate::model::{Column, Condition, FilterState, LoadedView, SavedFilter};
use crate::operators::{get_operator, CONTAINS};

#[derive(Debug, Clone, Default)]
pub struct FilterSession {
    columns: Vec<Column>,
    conditions: Vec<Condition>,
}

impl FilterSession {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            conditions: Vec::new(),
        }
    }

    /// Start from an existing condition list. Every condition is checked
    /// against the columns and the operator registry.
    pub fn with_conditions(columns: Vec<Column>, conditions: Vec<Condition>) -> Result<Self> {
        let mut session = Self::new(columns);
        for condition in &conditions {
            session.check_field(&condition.field)?;
            session.check_operator(&condition.operator)?;
        }
        session.conditions = conditions;
        Ok(session)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Columns a condition may target.
    pub fn filterable_fields(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.numeric)
    }

    fn check_field(&self, field: &str) -> Result<()> {
        if self.filterable_fields().any(|c| c.id == field) {
            Ok(())
        } else {
            Err(SieveError::UnknownField(field.to_string()))
        }
    }

    fn check_operator(&self, operator: &str) -> Result<()> {
        get_operator(operator)
            .map(|_| ())
            .ok_or_else(|| SieveError::UnknownOperator(operator.to_string()))
    }

    fn condition_mut(&mut self, index: usize) -> Result<&mut Condition> {
        self.conditions
            .get_mut(index)
            .ok_or(SieveError::ConditionOutOfRange(index))
    }

    /// Append a blank `contains` condition on the first filterable field.
    /// Returns its position.
    pub fn add_condition(&mut self) -> Result<usize> {
        let field = self
            .filterable_fields()
            .next()
            .map(|c| c.id.clone())
            .ok_or_else(|| SieveError::Api("no filterable fields".to_string()))?;
        self.conditions.push(Condition::new(field, CONTAINS, ""));
        Ok(self.conditions.len() - 1)
    }

    /// Append a fully specified condition.
    pub fn push(&mut self, condition: Condition) -> Result<usize> {
        self.check_field(&condition.field)?;
        self.check_operator(&condition.operator)?;
        self.conditions.push(condition);
        Ok(self.conditions.len() - 1)
    }

    pub fn set_field(&mut self, index: usize, field: &str) -> Result<()> {
        self.check_field(field)?;
        let condition = self.condition_mut(index)?;
        if condition.field != field {
            condition.field = field.to_string();
            condition.value.clear();
        }
        Ok(())
    }

    pub fn set_operator(&mut self, index: usize, operator: &str) -> Result<()> {
        self.check_operator(operator)?;
        let condition = self.condition_mut(index)?;
        if condition.operator != operator {
            condition.operator = operator.to_string();
            condition.value.clear();
        }
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.condition_mut(index)?.value = value.into();
        Ok(())
    }

    pub fn remove_condition(&mut self, index: usize) -> Result<Condition> {
        if index >= self.conditions.len() {
            return Err(SieveError::ConditionOutOfRange(index));
        }
        Ok(self.conditions.remove(index))
    }

    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    pub fn filter_state(&self) -> FilterState {
        conditions_to_filter_state(&self.conditions)
    }

    /// Filter `records` with the current conditions.
    pub fn apply<'r, T, F>(&self, records: &'r [T], accessor: F) -> Vec<&'r T>
    where
        F: Fn(&T, &str) -> Option<String>,
    {
        apply_filters(records, &self.conditions, accessor)
    }

    /// Sorted distinct values of the field targeted by condition `index`, for
    /// an exact-match selector.
    pub fn value_options<T, F>(
        &self,
        records: &[T],
        index: usize,
        accessor: F,
    ) -> Result<BTreeSet<String>>
    where
        F: Fn(&T, &str) -> Option<String>,
    {
        let condition = self
            .conditions
            .get(index)
            .ok_or(SieveError::ConditionOutOfRange(index))?;
        Ok(unique_values(records, &condition.field, accessor))
    }

    /// Whether the current conditions can be saved under `name`.
    pub fn can_save(&self, name: &str) -> bool {
        check_save(name, &self.conditions).is_ok()
    }

    /// Build the view to persist for `name`.
    pub fn to_saved_filter(&self, name: &str) -> Result<SavedFilter> {
        check_save(name, &self.conditions)?;
        Ok(SavedFilter::new(name.trim(), self.conditions.clone()))
    }

    /// Replace the conditions with a saved view's, verbatim.
    ///
    /// The view's conditions are replayed even if they reference columns this
    /// session no longer has; such conditions simply match nothing.
    pub fn load_view(&mut self, view: &SavedFilter) -> LoadedView {
        self.conditions = view.conditions.clone();
        LoadedView::from(view)
    }
}
