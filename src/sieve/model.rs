use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::codec::{conditions_to_filter_state, filter_state_to_conditions};

/// Flat `field -> value` projection of a condition list.
///
/// Ordered so that it serializes and converts back into conditions deterministically.
pub type FilterState = BTreeMap<String, String>;

/// A single `(field, operator, value)` predicate.
///
/// The operator is kept as its registry id rather than a closed enum so that
/// stored views written by a newer version still load; ids the registry does
/// not know simply never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: String,
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Convenience: create a `contains` condition.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, crate::operators::CONTAINS, value)
    }

    /// Convenience: create an `equals` condition.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, crate::operators::EQUALS, value)
    }
}

/// Describes one column of the record collection a caller filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    /// Numeric columns are left out of the filterable field selector.
    pub numeric: bool,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            numeric: false,
        }
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

/// A named, persisted set of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedFilter {
    /// Build a new, non-default view. `filters` is derived from `conditions`.
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            filters: conditions_to_filter_state(&conditions),
            conditions,
            is_default: false,
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// All saved views for one storage key.
///
/// The default flag of the contained views can only change through
/// [`SavedFilters::set_default`] and [`SavedFilters::toggle_default`], which keep
/// at most one view marked as default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SavedFilters {
    filters: Vec<SavedFilter>,
}

impl SavedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SavedFilter> {
        self.filters.iter()
    }

    pub fn as_slice(&self) -> &[SavedFilter] {
        &self.filters
    }

    pub fn get(&self, id: &str) -> Option<&SavedFilter> {
        self.filters.iter().find(|f| f.id == id)
    }

    pub fn default_filter(&self) -> Option<&SavedFilter> {
        self.filters.iter().find(|f| f.is_default)
    }

    /// Append a view. The first view of a collection becomes the default.
    pub fn add(&mut self, mut filter: SavedFilter) -> &SavedFilter {
        filter.is_default = self.filters.is_empty();
        self.filters.push(filter);
        &self.filters[self.filters.len() - 1]
    }

    /// Remove a view by id. No other view is promoted to default.
    pub fn remove(&mut self, id: &str) -> Option<SavedFilter> {
        let pos = self.filters.iter().position(|f| f.id == id)?;
        Some(self.filters.remove(pos))
    }

    /// Make `id` the only default, or clear every default with `None`.
    ///
    /// Returns false (and changes nothing) when `id` is not in the collection.
    pub fn set_default(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if self.get(id).is_none() {
                return false;
            }
        }
        for filter in &mut self.filters {
            filter.is_default = Some(filter.id.as_str()) == id;
        }
        true
    }

    /// Flip the default flag of `id`, clearing it on every sibling.
    ///
    /// Returns the new flag value, or `None` when `id` is unknown.
    pub fn toggle_default(&mut self, id: &str) -> Option<bool> {
        let currently = self.get(id)?.is_default;
        let target = if currently { None } else { Some(id) };
        self.set_default(target);
        Some(!currently)
    }

    pub fn into_vec(self) -> Vec<SavedFilter> {
        self.filters
    }
}

/// What a caller gets back when a saved view is opened: the flat projection for
/// simple consumers and the original conditions for re-rendering the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedView {
    pub filter_state: FilterState,
    pub conditions: Vec<Condition>,
}

impl From<&SavedFilter> for LoadedView {
    fn from(view: &SavedFilter) -> Self {
        Self {
            filter_state: view.filters.clone(),
            conditions: view.conditions.clone(),
        }
    }
}

impl From<Vec<SavedFilter>> for SavedFilters {
    /// Adopts an arbitrary list, keeping only the first default if several
    /// entries claim it and re-deriving each entry's `filters` from its
    /// conditions. Entries that only carry `filters` get `contains` conditions.
    fn from(mut filters: Vec<SavedFilter>) -> Self {
        let mut seen_default = false;
        for filter in &mut filters {
            if filter.conditions.is_empty() {
                filter.conditions = filter_state_to_conditions(&filter.filters);
            }
            filter.filters = conditions_to_filter_state(&filter.conditions);
            if filter.is_default {
                if seen_default {
                    filter.is_default = false;
                }
                seen_default = true;
            }
        }
        Self { filters }
    }
}

impl<'a> IntoIterator for &'a SavedFilters {
    type Item = &'a SavedFilter;
    type IntoIter = std::slice::Iter<'a, SavedFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
