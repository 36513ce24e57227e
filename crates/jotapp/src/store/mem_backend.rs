use super::backend::{Area, FileKind, StorageBackend};
use crate::error::{JotError, Result};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

type Files = HashMap<(Area, String, FileKind), String>;

/// In-memory storage backend for testing.
///
/// Uses a `Mutex` rather than `RefCell` so stores built on it stay `Sync`,
/// like the filesystem-backed one.
#[derive(Default)]
pub struct MemBackend {
    files: Mutex<Files>,
    simulate_archive_error: Mutex<Option<FileKind>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every archive move of `kind` fail, to exercise the abort path.
    pub fn set_simulate_archive_error(&self, kind: Option<FileKind>) {
        *lock(&self.simulate_archive_error) = kind;
    }

    /// Test helper to plant a file directly, bypassing the create-new guard.
    pub fn insert(&self, area: Area, base: &str, kind: FileKind, data: &str) {
        lock(&self.files).insert((area, base.to_string(), kind), data.to_string());
    }

    pub fn file_count(&self, area: Area) -> usize {
        lock(&self.files).keys().filter(|(a, _, _)| *a == area).count()
    }

    fn rename(&self, from: (Area, &str), to: (Area, &str), kind: FileKind) -> io::Result<()> {
        let mut files = lock(&self.files);
        let data = files
            .remove(&(from.0, from.1.to_string(), kind))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, from.1.to_string()))?;
        files.insert((to.0, to.1.to_string(), kind), data);
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StorageBackend for MemBackend {
    fn ensure_layout(&self) -> Result<()> {
        Ok(())
    }

    fn list_bases(&self, area: Area) -> Result<Vec<String>> {
        Ok(lock(&self.files)
            .keys()
            .filter(|(a, _, k)| *a == area && *k == FileKind::Content)
            .map(|(_, base, _)| base.clone())
            .collect())
    }

    fn read(&self, area: Area, base: &str, kind: FileKind) -> Result<Option<String>> {
        Ok(lock(&self.files)
            .get(&(area, base.to_string(), kind))
            .cloned())
    }

    fn exists(&self, area: Area, base: &str, kind: FileKind) -> Result<bool> {
        Ok(lock(&self.files).contains_key(&(area, base.to_string(), kind)))
    }

    fn write_new(&self, base: &str, kind: FileKind, data: &str) -> Result<()> {
        let mut files = lock(&self.files);
        let key = (Area::Live, base.to_string(), kind);
        if files.contains_key(&key) {
            return Err(JotError::Collision {
                path: self.path(Area::Live, base, kind),
            });
        }
        files.insert(key, data.to_string());
        Ok(())
    }

    fn archive(&self, live: &str, archived: &str, kind: FileKind) -> io::Result<()> {
        if *lock(&self.simulate_archive_error) == Some(kind) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated archive error",
            ));
        }
        self.rename((Area::Live, live), (Area::Archive, archived), kind)
    }

    fn unarchive(&self, archived: &str, live: &str, kind: FileKind) -> io::Result<()> {
        self.rename((Area::Archive, archived), (Area::Live, live), kind)
    }

    fn path(&self, area: Area, base: &str, kind: FileKind) -> PathBuf {
        let dir = match area {
            Area::Live => "mem://entries",
            Area::Archive => "mem://entries/old",
        };
        let ext = match kind {
            FileKind::Content => "txt",
            FileKind::Meta => "json",
        };
        PathBuf::from(format!("{}/{}.{}", dir, base, ext))
    }
}
