//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Environment variables**: `SIEVE_DATA_DIR`, `SIEVE_STORAGE_KEY`,
//!    `SIEVE_STRICT_OPERATORS`.
//! 2. **Project Config**: `.sieve/sieve.toml` in the working directory.
//! 3. **Global Config**: `sieve.toml` in the OS config directory (via the
//!    `directories` crate).
//! 4. **Compiled Defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where saved views are stored |
//! | `storage_key` | `default-filters` | Key used when none is given |
//! | `strict_operators` | `true` | Reject unknown operators before filtering |

use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CONFIG_FILENAME: &str = "sieve.toml";
pub const PROJECT_DIR: &str = ".sieve";
pub const DEFAULT_STORAGE_KEY: &str = "default-filters";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SieveConfig {
    /// Root directory for saved views. Falls back to the OS data directory.
    #[config(env = "SIEVE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key used when a command does not name one.
    #[config(env = "SIEVE_STORAGE_KEY", default = "default-filters")]
    pub storage_key: String,

    /// Reject conditions with unknown operators instead of excluding records.
    #[config(env = "SIEVE_STRICT_OPERATORS", default = true)]
    pub strict_operators: bool,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            strict_operators: true,
        }
    }
}

impl SieveConfig {
    /// Load configuration for a working directory. Missing files are skipped.
    pub fn load(cwd: &Path) -> Result<Self> {
        let mut builder = Self::builder()
            .env()
            .file(cwd.join(PROJECT_DIR).join(CONFIG_FILENAME));
        if let Some(dirs) = project_dirs() {
            builder = builder.file(dirs.config_dir().join(CONFIG_FILENAME));
        }
        Ok(builder.load()?)
    }

    /// Load a single file layered over the defaults, ignoring the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::builder().file(path).load()?)
    }

    /// Directory holding saved-view files.
    pub fn filters_dir(&self) -> PathBuf {
        let root = self.data_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(PROJECT_DIR))
        });
        root.join("filters")
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "sieve", "sieve")
}
