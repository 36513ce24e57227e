//! # Startup
//!
//! [`initialize`] turns configuration into a ready [`JotApi`]:
//!
//! 1. Load [`JotConfig`] (environment + `jot.toml`).
//! 2. Pick the store root: explicit override, else `data_dir` from config, else the OS
//!    data directory (`~/.local/share/jot` on Linux).
//! 3. Open the [`FileStore`], creating `entries/` and `entries/old/`.
//!
//! Any failure is returned; the store is unusable without its directories, so
//! callers should treat it as fatal.

use crate::api::JotApi;
use crate::config::{project_dirs, JotConfig};
use crate::error::{JotError, Result};
use crate::store::fs::FileStore;
use std::path::{Path, PathBuf};

pub struct JotContext {
    pub api: JotApi<FileStore>,
    pub config: JotConfig,
    pub root: PathBuf,
}

/// Where the store lives, in priority order.
pub fn resolve_data_dir(config: &JotConfig, data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override.or_else(|| config.data_dir.clone()) {
        return Ok(path);
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| JotError::Config("could not determine a data directory".to_string()))
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<JotContext> {
    let config = JotConfig::load_default()?;
    initialize_with(config, data_override)
}

/// Like [`initialize`] with an already loaded config.
pub fn initialize_with(config: JotConfig, data_override: Option<PathBuf>) -> Result<JotContext> {
    let root = resolve_data_dir(&config, data_override)?;
    let store = open_store(&root, &config.content_ext())?;
    log::debug!("store opened at {}", root.display());

    Ok(JotContext {
        api: JotApi::new(store),
        config,
        root,
    })
}

fn open_store(root: &Path, content_ext: &str) -> Result<FileStore> {
    FileStore::open_dir(root, content_ext).inspect_err(|e| {
        log::error!("cannot create store directories under {}: {}", root.display(), e);
    })
}
