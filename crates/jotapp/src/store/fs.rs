use super::entry_store::EntryStore;
use super::fs_backend::FsBackend;
use crate::error::Result;
use std::path::Path;

pub type FileStore = EntryStore<FsBackend>;

impl FileStore {
    /// Open the store rooted at `root`, creating `entries/` and `entries/old/` as needed.
    pub fn open_dir(root: &Path, content_ext: &str) -> Result<Self> {
        EntryStore::open(FsBackend::new(root).with_content_ext(content_ext))
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }
}
