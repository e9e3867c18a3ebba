use crate::commands::CmdMessage;
use crate::engine::{apply_filters, validate_conditions};
use crate::error::Result;
use crate::model::{Condition, SavedFilter};
use crate::store::{load_saved_filters, validate_storage_key, KvBackend};

use super::helpers::resolve_view;

/// Which conditions a filtering pass should use.
#[derive(Debug, Clone)]
pub enum ConditionSource {
    /// Conditions built by the caller
    Explicit(Vec<Condition>),
    /// Conditions of a saved view, by selector
    View(String),
    /// The storage key's default view, or nothing if none is set
    Default,
    /// No filtering
    All,
}

/// Outcome of a filtering pass.
#[derive(Debug)]
pub struct Applied<'r, T> {
    pub records: Vec<&'r T>,
    pub conditions: Vec<Condition>,
    /// The saved view the conditions came from, if any
    pub view: Option<SavedFilter>,
    pub messages: Vec<CmdMessage>,
}

/// Resolve the condition source and filter `records` with it.
///
/// With `strict` set, conditions naming unknown operators are rejected instead
/// of silently excluding every record.
pub fn run<'r, B, T, F>(
    backend: &B,
    key: &str,
    records: &'r [T],
    source: ConditionSource,
    strict: bool,
    accessor: F,
) -> Result<Applied<'r, T>>
where
    B: KvBackend,
    F: Fn(&T, &str) -> Option<String>,
{
    let mut messages = Vec::new();
    let (conditions, view) = match source {
        ConditionSource::Explicit(conditions) => (conditions, None),
        ConditionSource::View(selector) => {
            validate_storage_key(key)?;
            let filters = load_saved_filters(backend, key);
            let view = resolve_view(&filters, &selector)?.clone();
            (view.conditions.clone(), Some(view))
        }
        ConditionSource::Default => {
            validate_storage_key(key)?;
            let filters = load_saved_filters(backend, key);
            match filters.default_filter() {
                Some(view) => {
                    messages.push(CmdMessage::info(format!(
                        "Using default view '{}'",
                        view.name
                    )));
                    (view.conditions.clone(), Some(view.clone()))
                }
                None => (Vec::new(), None),
            }
        }
        ConditionSource::All => (Vec::new(), None),
    };

    if strict {
        validate_conditions(&conditions)?;
    }

    let matched = apply_filters(records, &conditions, accessor);
    messages.push(CmdMessage::info(format!(
        "{} of {} records match",
        matched.len(),
        records.len()
    )));

    Ok(Applied {
        records: matched,
        conditions,
        view,
        messages,
    })
}
