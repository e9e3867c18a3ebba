use crate::commands::{CmdMessage, CmdResult};
use crate::engine::validate_conditions;
use crate::error::{Result, SieveError};
use crate::model::{Condition, LoadedView, SavedFilter};
use crate::store::{
    load_saved_filters, read_saved_filters, save_filters, validate_storage_key, KvBackend,
};

use super::helpers::resolve_view;

pub fn list<B: KvBackend>(backend: &B, key: &str) -> Result<CmdResult> {
    validate_storage_key(key)?;
    let filters = load_saved_filters(backend, key);
    let mut result = CmdResult::default().with_views(filters.into_vec());
    if result.views.is_empty() {
        result.add_message(CmdMessage::info(format!("No saved views for '{}'", key)));
    }
    Ok(result)
}

/// Check the preconditions for saving a condition set under `name`.
pub fn check_save(name: &str, conditions: &[Condition]) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SieveError::InvalidSave("a name is required".to_string()));
    }
    if conditions.is_empty() {
        return Err(SieveError::InvalidSave(
            "at least one condition is required".to_string(),
        ));
    }
    validate_conditions(conditions)
}

pub fn save<B: KvBackend>(
    backend: &B,
    key: &str,
    name: &str,
    conditions: Vec<Condition>,
) -> Result<CmdResult> {
    check_save(name, &conditions)?;

    let mut filters = read_saved_filters(backend, key)?;
    let view = filters
        .add(SavedFilter::new(name.trim(), conditions))
        .clone();
    save_filters(backend, key, &filters)?;

    let mut result = CmdResult::default();
    let suffix = if view.is_default() { " (default)" } else { "" };
    result.add_message(CmdMessage::success(format!(
        "Saved view '{}'{}",
        view.name, suffix
    )));
    Ok(result.with_views(vec![view]))
}

pub fn delete<B: KvBackend>(backend: &B, key: &str, selector: &str) -> Result<CmdResult> {
    let mut filters = read_saved_filters(backend, key)?;
    let id = resolve_view(&filters, selector)?.id.clone();
    let removed = filters
        .remove(&id)
        .ok_or_else(|| SieveError::FilterNotFound(id.clone()))?;
    save_filters(backend, key, &filters)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted view '{}'",
        removed.name
    )));
    if removed.is_default() {
        result.add_message(CmdMessage::info("No default view is set now"));
    }
    Ok(result.with_views(vec![removed]))
}

pub fn toggle_default<B: KvBackend>(backend: &B, key: &str, selector: &str) -> Result<CmdResult> {
    let mut filters = read_saved_filters(backend, key)?;
    let id = resolve_view(&filters, selector)?.id.clone();
    let now_default = filters
        .toggle_default(&id)
        .ok_or_else(|| SieveError::FilterNotFound(id.clone()))?;
    save_filters(backend, key, &filters)?;

    default_change_result(filters.get(&id).cloned(), now_default)
}

/// Make the selected view the only default, or clear the default with `None`.
pub fn set_default<B: KvBackend>(
    backend: &B,
    key: &str,
    selector: Option<&str>,
) -> Result<CmdResult> {
    let mut filters = read_saved_filters(backend, key)?;
    let id = match selector {
        Some(selector) => Some(resolve_view(&filters, selector)?.id.clone()),
        None => None,
    };
    filters.set_default(id.as_deref());
    save_filters(backend, key, &filters)?;

    match id {
        Some(id) => default_change_result(filters.get(&id).cloned(), true),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success("Cleared default view"));
            Ok(result)
        }
    }
}

fn default_change_result(view: Option<SavedFilter>, now_default: bool) -> Result<CmdResult> {
    let view = view.ok_or_else(|| SieveError::Store("view vanished during update".into()))?;
    let mut result = CmdResult::default();
    let message = if now_default {
        format!("'{}' is now the default view", view.name)
    } else {
        format!("'{}' is no longer the default view", view.name)
    };
    result.add_message(CmdMessage::success(message));
    Ok(result.with_views(vec![view]))
}

pub fn load<B: KvBackend>(backend: &B, key: &str, selector: &str) -> Result<CmdResult> {
    validate_storage_key(key)?;
    let filters = load_saved_filters(backend, key);
    let view = resolve_view(&filters, selector)?;
    Ok(CmdResult::default()
        .with_loaded(LoadedView::from(view))
        .with_views(vec![view.clone()]))
}

/// Open the default view for `key`, if one is set.
pub fn load_default<B: KvBackend>(backend: &B, key: &str) -> Result<CmdResult> {
    validate_storage_key(key)?;
    let filters = load_saved_filters(backend, key);
    match filters.default_filter() {
        Some(view) => Ok(CmdResult::default()
            .with_loaded(LoadedView::from(view))
            .with_views(vec![view.clone()])),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!("No default view for '{}'", key)));
            Ok(result)
        }
    }
}

pub fn keys<B: KvBackend>(backend: &B) -> Result<CmdResult> {
    let keys = backend.keys()?;
    Ok(CmdResult::default().with_keys(keys))
}
