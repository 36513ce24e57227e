use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JotError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt entry metadata: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid entry id: {0:?}")]
    InvalidId(String),

    /// A freshly generated id already names a live entry (two creates within one second).
    #[error("Entry id already in use: {0} (retry in a second)")]
    IdInUse(String),

    /// The store was about to write over an existing file. Ids are derived so this
    /// can't happen unless something upstream is broken; nothing was overwritten.
    #[error("Refusing to overwrite existing file: {}", path.display())]
    Collision { path: PathBuf },

    #[error("Could not archive entry {id}: {source}")]
    Archival {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Config error: {0}")]
    Config(String),
}

impl JotError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, JotError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, JotError>;
