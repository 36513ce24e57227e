//! # Configuration
//!
//! Jot configuration is loaded with [`confique`], layering environment variables
//! over a TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Command line**: `--data` (handled in [`crate::init`], not here).
//! 2. **Environment variables**: `JOT_DATA`, `JOT_CONTENT_EXT`.
//! 3. **Config file**: `jot.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `data_dir` | `JOT_DATA` | OS data directory | Store root (holds `entries/`) |
//! | `content_ext` | `JOT_CONTENT_EXT` | `.txt` | Extension for entry content files |

use crate::error::{JotError, Result};
use crate::store::fs_backend::{DEFAULT_CONTENT_EXT, META_EXT};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "jot.toml";
/// Longest accepted content extension, dot included.
const MAX_EXT_LEN: usize = 16;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JotConfig {
    /// Root directory of the entry store.
    #[config(env = "JOT_DATA")]
    pub data_dir: Option<PathBuf>,

    /// Extension for content files (e.g. ".txt", ".md").
    #[config(env = "JOT_CONTENT_EXT", default = ".txt")]
    pub content_ext: String,
}

impl Default for JotConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            content_ext: DEFAULT_CONTENT_EXT.to_string(),
        }
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "jot", "jot")
}

/// `jot.toml` in the OS config directory, if one can be determined.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl JotConfig {
    /// Load from the environment and `file` (a missing file is fine).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = JotConfig::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        let config = builder
            .load()
            .map_err(|e| JotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the environment and the default config file.
    pub fn load_default() -> Result<Self> {
        Self::load(default_config_file().as_deref())
    }

    /// The content extension, normalized to start with a dot.
    pub fn content_ext(&self) -> String {
        if self.content_ext.starts_with('.') {
            self.content_ext.clone()
        } else {
            format!(".{}", self.content_ext)
        }
    }

    fn validate(&self) -> Result<()> {
        let ext = self.content_ext();
        if ext.len() < 2 || ext.len() > MAX_EXT_LEN || ext[1..].contains(['.', '/', '\\']) {
            return Err(JotError::Config(format!(
                "content_ext must be a simple extension, got {:?}",
                self.content_ext
            )));
        }
        if ext.eq_ignore_ascii_case(META_EXT) {
            return Err(JotError::Config(format!(
                "content_ext cannot be {} (used for metadata)",
                META_EXT
            )));
        }
        Ok(())
    }
}
