use super::backend::{Area, FileKind, StorageBackend};
use crate::error::{JotError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const LIVE_DIR: &str = "entries";
pub const ARCHIVE_DIR: &str = "old";
pub const DEFAULT_CONTENT_EXT: &str = ".txt";
pub const META_EXT: &str = ".json";

pub struct FsBackend {
    root: PathBuf,
    content_ext: String,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            content_ext: DEFAULT_CONTENT_EXT.to_string(),
        }
    }

    pub fn with_content_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.content_ext = ext.to_string();
        } else {
            self.content_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn content_ext(&self) -> &str {
        &self.content_ext
    }

    pub fn live_dir(&self) -> PathBuf {
        self.root.join(LIVE_DIR)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.live_dir().join(ARCHIVE_DIR)
    }

    fn area_dir(&self, area: Area) -> PathBuf {
        match area {
            Area::Live => self.live_dir(),
            Area::Archive => self.archive_dir(),
        }
    }

    fn ext(&self, kind: FileKind) -> &str {
        match kind {
            FileKind::Content => self.content_ext.as_str(),
            FileKind::Meta => META_EXT,
        }
    }

    fn filename(&self, base: &str, kind: FileKind) -> String {
        format!("{}{}", base, self.ext(kind))
    }
}

impl StorageBackend for FsBackend {
    fn ensure_layout(&self) -> Result<()> {
        // create_dir_all on the archive creates the live dir on the way
        fs::create_dir_all(self.archive_dir()).map_err(JotError::Io)?;
        Ok(())
    }

    fn list_bases(&self, area: Area) -> Result<Vec<String>> {
        let dir = self.area_dir(area);
        let mut bases = Vec::new();

        for entry in fs::read_dir(&dir).map_err(JotError::Io)? {
            let entry = entry.map_err(JotError::Io)?;
            if !entry.file_type().map_err(JotError::Io)?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                log::warn!("skipping non UTF-8 file name in {}", dir.display());
                continue;
            };
            if let Some(base) = name.strip_suffix(self.content_ext.as_str()) {
                if !base.is_empty() {
                    bases.push(base.to_string());
                }
            }
        }
        Ok(bases)
    }

    fn read(&self, area: Area, base: &str, kind: FileKind) -> Result<Option<String>> {
        let path = self.path(area, base, kind);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(JotError::Io(e)),
        }
    }

    fn exists(&self, area: Area, base: &str, kind: FileKind) -> Result<bool> {
        self.path(area, base, kind)
            .try_exists()
            .map_err(JotError::Io)
    }

    fn write_new(&self, base: &str, kind: FileKind, data: &str) -> Result<()> {
        let path = self.path(Area::Live, base, kind);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(JotError::Collision { path });
            }
            Err(e) => return Err(JotError::Io(e)),
        };
        file.write_all(data.as_bytes()).map_err(JotError::Io)?;
        file.sync_all().map_err(JotError::Io)?;
        Ok(())
    }

    fn archive(&self, live: &str, archived: &str, kind: FileKind) -> io::Result<()> {
        fs::rename(
            self.path(Area::Live, live, kind),
            self.path(Area::Archive, archived, kind),
        )
    }

    fn unarchive(&self, archived: &str, live: &str, kind: FileKind) -> io::Result<()> {
        fs::rename(
            self.path(Area::Archive, archived, kind),
            self.path(Area::Live, live, kind),
        )
    }

    fn path(&self, area: Area, base: &str, kind: FileKind) -> PathBuf {
        self.area_dir(area).join(self.filename(base, kind))
    }
}
