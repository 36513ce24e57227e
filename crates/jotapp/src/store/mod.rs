//! # Storage Layer
//!
//! The entry store persists each entry as a pair of plain files and keeps every
//! superseded version.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! └── entries/
//!     ├── <ID>_<title>.txt                 # markdown, verbatim
//!     ├── <ID>_<title>.json                # entry record (ID, Title, Markdown, Updated)
//!     └── old/
//!         ├── <ID>_<title>_<stamp>.txt     # archived versions, never deleted
//!         └── <ID>_<title>_<stamp>.json
//! ```
//!
//! See [`naming`] for how ids, titles and stamps become file names.
//!
//! ## Files Are Truth
//!
//! There is no index. Every lookup scans `entries/` for `<ID>_*.txt`, so the store
//! holds no state between calls (apart from write locks) and can be rebuilt at any time.
//!
//! ## Store, Step by Step
//!
//! 1. Resolve the live base name for the id (scan).
//! 2. If one exists, move both files into `old/` with a timestamp suffix. A failed move
//!    aborts the update; a half-done move is rolled back.
//! 3. Write the content file, then the metadata file, under the name derived from the
//!    (possibly new) title. Files are created with create-new semantics: an existing
//!    file is never overwritten, the store fails with `Collision` instead.
//!
//! Steps 1-3 run under a per-id mutex, so concurrent updates of the same entry
//! through one store instance cannot interleave. Separate store instances (or
//! processes) pointed at the same directory are not coordinated.
//!
//! ## Reads
//!
//! `get`, `list` and `search` never write. A concurrent update can make a file vanish
//! between scan and read; that surfaces as `NotFound` and is safe to retry.
//! `list_with` / `search_with` take a [`Cancellation`] checked between entries.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production, backed by [`fs_backend::FsBackend`].
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

pub mod backend;
pub mod cancel;
pub mod entry_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod naming;

pub use backend::{Area, FileKind, StorageBackend};
pub use cancel::Cancellation;
pub use entry_store::EntryStore;
