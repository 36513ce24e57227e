use crate::error::Result;
use std::io;
use std::path::PathBuf;

/// Which of the two directories a file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// `entries/`: the current version of every entry.
    Live,
    /// `entries/old/`: superseded versions, append-only.
    Archive,
}

/// The two halves of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Raw markdown, authoritative for the entry body.
    Content,
    /// JSON-serialized entry record.
    Meta,
}

impl FileKind {
    pub const ALL: [FileKind; 2] = [FileKind::Content, FileKind::Meta];
}

/// Abstract interface for raw storage I/O.
///
/// The backend knows *where* bytes go (directories, extensions), never *why*.
/// Id resolution, archival and versioning live in [`super::EntryStore`].
/// Files are addressed by base name (no extension) plus [`FileKind`].
pub trait StorageBackend {
    /// Create the live and archive areas if they are missing. Idempotent.
    fn ensure_layout(&self) -> Result<()>;

    /// Base names of all content files in an area, in no particular order.
    fn list_bases(&self, area: Area) -> Result<Vec<String>>;

    /// Read a file. `Ok(None)` if it does not exist; `Err` only for real I/O failures.
    fn read(&self, area: Area, base: &str, kind: FileKind) -> Result<Option<String>>;

    /// Whether a file exists.
    fn exists(&self, area: Area, base: &str, kind: FileKind) -> Result<bool>;

    /// Create a new live file. MUST NOT replace an existing one: if the target
    /// exists, fail with [`crate::error::JotError::Collision`] and leave it untouched.
    fn write_new(&self, base: &str, kind: FileKind, data: &str) -> Result<()>;

    /// Move a live file into the archive under a new base name.
    fn archive(&self, live: &str, archived: &str, kind: FileKind) -> io::Result<()>;

    /// Undo [`StorageBackend::archive`] when the other half of a pair failed to move.
    fn unarchive(&self, archived: &str, live: &str, kind: FileKind) -> io::Result<()>;

    /// Where a file is (or would be). Virtual for non-filesystem backends.
    fn path(&self, area: Area, base: &str, kind: FileKind) -> PathBuf;
}
