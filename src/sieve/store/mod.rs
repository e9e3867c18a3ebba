//! # Storage Layer
//!
//! Saved views are persisted as one blob per *storage key*. A storage key is a
//! namespace owned by a single table or screen (`leadTableFilters`,
//! `products-filters`, ...); keys never share views.
//!
//! Raw I/O sits behind the [`KvBackend`] trait:
//! - [`fs_backend::FsBackend`]: production, one JSON file per key
//! - [`mem_backend::MemBackend`]: for tests, no persistence
//!
//! ## Blob Format
//!
//! ```text
//! {
//!   "version": 1,
//!   "filters": [ { "id": ..., "name": ..., "filters": {...},
//!                  "conditions": [...], "isDefault": true } ]
//! }
//! ```
//!
//! Blobs written before the envelope existed are bare arrays and still load.
//! Unknown fields are ignored so newer writers do not break older readers.
//!
//! ## Failure Model
//!
//! [`load_saved_filters`] never fails: a missing, unreadable or corrupt blob
//! reads as an empty collection and is logged. [`read_saved_filters`] is the
//! loader for read-modify-write: it reports invalid keys and backend read
//! errors, and only corrupt content reads as empty. Writes report errors.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};
use crate::model::{SavedFilter, SavedFilters};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::KvBackend;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    filters: &'a SavedFilters,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Versioned {
        #[allow(dead_code)]
        version: u32,
        filters: Vec<SavedFilter>,
    },
    Legacy(Vec<SavedFilter>),
}

impl StoredBlob {
    fn into_filters(self) -> Vec<SavedFilter> {
        match self {
            StoredBlob::Versioned { filters, .. } => filters,
            StoredBlob::Legacy(filters) => filters,
        }
    }
}

/// Validates a storage key.
///
/// Keys become file names, so they are limited to ASCII alphanumerics, `-`,
/// `_` and `.`, and may not start with `.`.
pub fn validate_storage_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(SieveError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.starts_with('.') {
        return Err(SieveError::InvalidKey(format!(
            "'{}' cannot start with '.'",
            key
        )));
    }
    if let Some(ch) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(SieveError::InvalidKey(format!(
            "'{}' contains invalid character '{}'",
            key, ch
        )));
    }
    Ok(())
}

/// Load the saved views for `key`. Never fails; bad data reads as empty.
pub fn load_saved_filters<B: KvBackend>(backend: &B, key: &str) -> SavedFilters {
    match read_saved_filters(backend, key) {
        Ok(filters) => filters,
        Err(e) => {
            tracing::warn!(key, error = %e, "Could not read saved filters, treating as empty");
            SavedFilters::new()
        }
    }
}

/// Load the saved views for `key` ahead of a change that writes them back.
///
/// Malformed content still reads as empty, but an invalid key or a failed
/// backend read is returned, so the following write cannot replace views it
/// never saw.
pub fn read_saved_filters<B: KvBackend>(backend: &B, key: &str) -> Result<SavedFilters> {
    validate_storage_key(key)?;
    let Some(raw) = backend.get(key)? else {
        return Ok(SavedFilters::new());
    };
    Ok(decode(key, &raw))
}

fn decode(key: &str, raw: &str) -> SavedFilters {
    match serde_json::from_str::<StoredBlob>(raw) {
        Ok(blob) => {
            let filters = SavedFilters::from(blob.into_filters());
            tracing::debug!(key, count = filters.len(), "Loaded saved filters");
            filters
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed saved filters, treating as empty");
            SavedFilters::new()
        }
    }
}

/// Replace every saved view stored under `key`.
pub fn save_filters<B: KvBackend>(backend: &B, key: &str, filters: &SavedFilters) -> Result<()> {
    validate_storage_key(key)?;
    let envelope = EnvelopeRef {
        version: FORMAT_VERSION,
        filters,
    };
    let content = serde_json::to_string_pretty(&envelope).map_err(SieveError::Serialization)?;
    backend.set(key, &content)?;
    tracing::debug!(key, count = filters.len(), "Saved filters");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::model::{Condition, LoadedView};

    fn sample() -> SavedFilters {
        let mut filters = SavedFilters::new();
        filters.add(SavedFilter::new(
            "High-value leads",
            vec![Condition::contains("source", "web")],
        ));
        filters.add(SavedFilter::new(
            "Referrals",
            vec![Condition::equals("source", "Referral")],
        ));
        filters
    }

    #[test]
    fn missing_key_loads_empty() {
        let backend = MemBackend::new();
        assert!(load_saved_filters(&backend, "leadTableFilters").is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let backend = MemBackend::new();
        let filters = sample();
        save_filters(&backend, "leadTableFilters", &filters).unwrap();

        let loaded = load_saved_filters(&backend, "leadTableFilters");
        assert_eq!(loaded, filters);
    }

    #[test]
    fn save_writes_versioned_envelope() {
        let backend = MemBackend::new();
        save_filters(&backend, "leads", &sample()).unwrap();

        let raw = backend.get("leads").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], FORMAT_VERSION);
        assert_eq!(json["filters"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn save_replaces_whole_collection() {
        let backend = MemBackend::new();
        save_filters(&backend, "leads", &sample()).unwrap();
        save_filters(&backend, "leads", &SavedFilters::new()).unwrap();
        assert!(load_saved_filters(&backend, "leads").is_empty());
    }

    #[test]
    fn keys_are_isolated() {
        let backend = MemBackend::new();
        save_filters(&backend, "leads", &sample()).unwrap();
        assert!(load_saved_filters(&backend, "tasks").is_empty());
        assert_eq!(load_saved_filters(&backend, "leads").len(), 2);
    }

    #[test]
    fn garbage_loads_empty() {
        let backend = MemBackend::new();
        backend.insert_raw("leads", "{not json");
        assert!(load_saved_filters(&backend, "leads").is_empty());

        backend.insert_raw("leads", r#"{"version": 1, "filters": "nope"}"#);
        assert!(load_saved_filters(&backend, "leads").is_empty());

        backend.insert_raw("leads", "42");
        assert!(load_saved_filters(&backend, "leads").is_empty());
    }

    #[test]
    fn legacy_bare_array_loads() {
        let backend = MemBackend::new();
        backend.insert_raw(
            "leads",
            r#"[{"id":"1712345678901","name":"Web","filters":{"source":"web"},
                "conditions":[{"field":"source","operator":"contains","value":"web"}],
                "isDefault":true}]"#,
        );

        let loaded = load_saved_filters(&backend, "leads");
        assert_eq!(loaded.len(), 1);
        let view = loaded.get("1712345678901").unwrap();
        assert!(view.is_default());
        assert!(view.created_at.is_none());
        assert_eq!(view.conditions, vec![Condition::contains("source", "web")]);
    }

    #[test]
    fn entry_without_filters_gets_them_from_conditions() {
        let backend = MemBackend::new();
        backend.insert_raw(
            "leads",
            r#"[{"id":"a","name":"Web","isDefault":true,
                "conditions":[{"field":"source","operator":"equals","value":"Website"}]}]"#,
        );

        let loaded = load_saved_filters(&backend, "leads");
        let view = LoadedView::from(loaded.get("a").unwrap());
        assert_eq!(view.filter_state["source"], "Website");
        assert_eq!(view.conditions, vec![Condition::equals("source", "Website")]);
    }

    #[test]
    fn future_fields_are_ignored() {
        let backend = MemBackend::new();
        backend.insert_raw(
            "leads",
            r#"{"version": 2, "owner": "someone", "filters": [
                {"id":"a","name":"A","conditions":[],"isDefault":false,"color":"red"}]}"#,
        );
        let loaded = load_saved_filters(&backend, "leads");
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn load_normalizes_multiple_defaults() {
        let backend = MemBackend::new();
        backend.insert_raw(
            "leads",
            r#"[{"id":"a","name":"A","isDefault":true},
                {"id":"b","name":"B","isDefault":true}]"#,
        );
        let loaded = load_saved_filters(&backend, "leads");
        assert_eq!(loaded.iter().filter(|f| f.is_default()).count(), 1);
        assert!(loaded.get("a").unwrap().is_default());
    }

    #[test]
    fn save_propagates_write_errors() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        assert!(save_filters(&backend, "leads", &sample()).is_err());
    }

    #[test]
    fn invalid_key_rejected_on_save_and_empty_on_load() {
        let backend = MemBackend::new();
        assert!(matches!(
            save_filters(&backend, "../escape", &sample()),
            Err(SieveError::InvalidKey(_))
        ));
        assert!(load_saved_filters(&backend, "../escape").is_empty());
    }

    #[test]
    fn read_surfaces_backend_errors_but_not_bad_data() {
        let backend = MemBackend::new();
        save_filters(&backend, "leads", &sample()).unwrap();

        backend.set_simulate_read_error(true);
        assert!(matches!(
            read_saved_filters(&backend, "leads"),
            Err(SieveError::Store(_))
        ));
        assert!(load_saved_filters(&backend, "leads").is_empty());
        backend.set_simulate_read_error(false);

        backend.insert_raw("leads", "{not json");
        assert!(read_saved_filters(&backend, "leads").unwrap().is_empty());
        assert!(read_saved_filters(&backend, "tasks").unwrap().is_empty());
        assert!(matches!(
            read_saved_filters(&backend, "../escape"),
            Err(SieveError::InvalidKey(_))
        ));
    }

    #[test]
    fn storage_key_rules() {
        assert!(validate_storage_key("leadTableFilters").is_ok());
        assert!(validate_storage_key("opportunities-filters").is_ok());
        assert!(validate_storage_key("crm.tasks_v2").is_ok());
        assert!(validate_storage_key("").is_err());
        assert!(validate_storage_key(".hidden").is_err());
        assert!(validate_storage_key("a/b").is_err());
        assert!(validate_storage_key("with space").is_err());
    }
}
