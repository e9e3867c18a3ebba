use crate::error::{Result, SieveError};
use crate::model::{SavedFilter, SavedFilters};

/// Resolve a view selector against a collection.
///
/// A selector is tried, in order, as an exact id, an exact name and a 1-based
/// display position, so a view named `2` is reachable by its name.
pub fn resolve_view<'a>(filters: &'a SavedFilters, selector: &str) -> Result<&'a SavedFilter> {
    let selector = selector.trim();

    filters
        .get(selector)
        .or_else(|| filters.iter().find(|f| f.name == selector))
        .or_else(|| {
            selector
                .parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .and_then(|index| filters.as_slice().get(index))
        })
        .ok_or_else(|| SieveError::FilterNotFound(selector.to_string()))
}
