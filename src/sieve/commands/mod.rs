//! # Command Layer
//!
//! Business logic for saved views and filtering. Each command is a plain
//! function over a [`KvBackend`](crate::store::KvBackend) and returns a
//! structured [`CmdResult`]; nothing here prints, prompts or exits.
//!
//! Commands load the collection for a storage key, change it through the
//! [`SavedFilters`](crate::model::SavedFilters) methods (the only place the
//! default flag is touched) and write the whole collection back.
//!
//! ## Command Modules
//!
//! - [`views`]: list, save, delete, default handling and loading of saved views
//! - [`apply`]: choose the conditions for a filtering pass and run it
//! - [`helpers`]: view selector resolution

use crate::model::{LoadedView, SavedFilter};
use serde::Serialize;

pub mod apply;
pub mod helpers;
pub mod views;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Views listed or touched by the command, in collection order
    pub views: Vec<SavedFilter>,
    /// Set by commands that open a view
    pub loaded: Option<LoadedView>,
    pub keys: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_views(mut self, views: Vec<SavedFilter>) -> Self {
        self.views = views;
        self
    }

    pub fn with_loaded(mut self, loaded: LoadedView) -> Self {
        self.loaded = Some(loaded);
        self
    }

    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = keys;
        self
    }
}
