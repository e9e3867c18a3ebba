//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point UIs use for saved views and filtering passes.
//!
//! The API:
//! - **Dispatches** to the command functions
//! - **Fixes configuration** once (strict operator checking) so callers do not
//!   thread it through every call
//! - **Returns structured types** (`Result<CmdResult>`, [`Applied`])
//!
//! It does no business logic and no I/O of its own.
//!
//! ## Generic Over KvBackend
//!
//! `SieveApi<B: KvBackend>` is generic over the storage backend:
//! - Production: `SieveApi<FsBackend>`
//! - Testing: `SieveApi<MemBackend>`

use crate::commands::apply::{self, Applied, ConditionSource};
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{Condition, SavedFilters};
use crate::store::{self, KvBackend};

pub use crate::commands::{CmdMessage, MessageLevel};

pub struct SieveApi<B: KvBackend> {
    backend: B,
    strict_operators: bool,
}

impl<B: KvBackend> SieveApi<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            strict_operators: true,
        }
    }

    pub fn with_strict_operators(mut self, strict: bool) -> Self {
        self.strict_operators = strict;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Raw collection for `key`; empty when nothing (valid) is stored.
    pub fn load_saved_filters(&self, key: &str) -> SavedFilters {
        store::load_saved_filters(&self.backend, key)
    }

    /// Overwrite the collection stored for `key`.
    pub fn save_filters(&self, key: &str, filters: &SavedFilters) -> Result<()> {
        store::save_filters(&self.backend, key, filters)
    }

    pub fn list_views(&self, key: &str) -> Result<CmdResult> {
        commands::views::list(&self.backend, key)
    }

    pub fn save_view(&self, key: &str, name: &str, conditions: Vec<Condition>) -> Result<CmdResult> {
        commands::views::save(&self.backend, key, name, conditions)
    }

    pub fn delete_view(&self, key: &str, selector: &str) -> Result<CmdResult> {
        commands::views::delete(&self.backend, key, selector)
    }

    pub fn toggle_default(&self, key: &str, selector: &str) -> Result<CmdResult> {
        commands::views::toggle_default(&self.backend, key, selector)
    }

    pub fn set_default(&self, key: &str, selector: Option<&str>) -> Result<CmdResult> {
        commands::views::set_default(&self.backend, key, selector)
    }

    pub fn load_view(&self, key: &str, selector: &str) -> Result<CmdResult> {
        commands::views::load(&self.backend, key, selector)
    }

    pub fn default_view(&self, key: &str) -> Result<CmdResult> {
        commands::views::load_default(&self.backend, key)
    }

    pub fn storage_keys(&self) -> Result<CmdResult> {
        commands::views::keys(&self.backend)
    }

    pub fn apply<'r, T, F>(
        &self,
        key: &str,
        records: &'r [T],
        source: ConditionSource,
        accessor: F,
    ) -> Result<Applied<'r, T>>
    where
        F: Fn(&T, &str) -> Option<String>,
    {
        apply::run(
            &self.backend,
            key,
            records,
            source,
            self.strict_operators,
            accessor,
        )
    }
}
