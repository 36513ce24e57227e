use super::backend::{Area, FileKind, StorageBackend};
use super::cancel::Cancellation;
use super::naming;
use crate::error::{JotError, Result};
use crate::model::{ArchivedVersion, Entry, SearchMatch};
use chrono::Utc;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct EntryStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    /// One mutex per id; held across resolve, archive and write.
    write_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<B: StorageBackend> EntryStore<B> {
    /// Wrap a backend without touching storage.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Wrap a backend and make sure the live and archive areas exist.
    pub fn open(backend: B) -> Result<Self> {
        backend.ensure_layout()?;
        Ok(Self::with_backend(backend))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A new identifier. Ids from the same second are equal; see [`EntryStore::store`].
    pub fn generate_id(&self) -> String {
        naming::generate_id()
    }

    /// Create or update an entry and return it as stored.
    ///
    /// An entry without an id is new: it gets a generated id, and if that id already
    /// names a live entry the call fails with [`JotError::IdInUse`] rather than turning
    /// into an update. An entry with an id replaces whatever is live for it (the old
    /// pair moves to the archive first) or, when nothing is live, is written fresh.
    ///
    /// If the old pair cannot be archived the update is aborted with
    /// [`JotError::Archival`] and the live pair is left as it was. The same holds when
    /// a new title maps to a name that is already taken: that is a
    /// [`JotError::Collision`] before anything moves.
    pub fn store(&self, entry: &Entry) -> Result<Entry> {
        let mut entry = entry.clone();
        let creating = !entry.has_id();
        if creating {
            entry.id = self.generate_id();
        }
        naming::validate_id(&entry.id)?;

        let id = entry.id.clone();
        let id_lock = self.write_lock(&id);
        let result = {
            let _guard = lock(&id_lock);
            self.store_locked(entry, creating)
        };
        self.release_write_lock(&id, id_lock);
        result
    }

    fn store_locked(&self, mut entry: Entry, creating: bool) -> Result<Entry> {
        let target = naming::live_base(&entry.id, &entry.title);
        if let Some(current) = self.resolve(&entry.id)? {
            if creating {
                return Err(JotError::IdInUse(entry.id));
            }
            // a rename must not archive the live pair and then fail on the new name
            if current != target {
                self.ensure_free(&target)?;
            }
            self.archive_pair(&entry.id, &current)?;
        }

        entry.updated = Some(Utc::now());
        self.write_pair(&target, &entry)?;
        Ok(entry)
    }

    /// Load the live version of an entry.
    pub fn get(&self, id: &str) -> Result<Entry> {
        naming::validate_id(id)?;
        let base = self
            .resolve(id)?
            .ok_or_else(|| JotError::NotFound(id.to_string()))?;
        self.load(&base)
    }

    /// All live entries, oldest id first.
    pub fn list(&self) -> Result<Vec<Entry>> {
        self.list_with(&Cancellation::new())
    }

    pub fn list_with(&self, cancel: &Cancellation) -> Result<Vec<Entry>> {
        cancel.check()?;
        let bases = self.live_bases()?;
        let mut entries = Vec::with_capacity(bases.len());
        for base in bases {
            cancel.check()?;
            entries.push(self.load(&base)?);
        }
        Ok(entries)
    }

    /// Every line matching `pattern`, grouped per entry in [`EntryStore::list`] order.
    /// Entries without a matching line are left out.
    pub fn search(&self, pattern: &str) -> Result<Vec<SearchMatch>> {
        self.search_with(pattern, &Cancellation::new())
    }

    pub fn search_with(&self, pattern: &str, cancel: &Cancellation) -> Result<Vec<SearchMatch>> {
        let re = Regex::new(pattern)?;
        cancel.check()?;

        let mut results = Vec::new();
        for base in self.live_bases()? {
            cancel.check()?;
            let entry = self.load(&base)?;
            let lines: Vec<String> = entry
                .markdown
                .lines()
                .filter(|line| re.is_match(line))
                .map(str::to_string)
                .collect();
            if !lines.is_empty() {
                results.push(SearchMatch {
                    id: entry.id,
                    title: entry.title,
                    lines,
                });
            }
        }
        Ok(results)
    }

    /// Archived versions of an entry, oldest first. Empty if it was never updated.
    pub fn history(&self, id: &str) -> Result<Vec<ArchivedVersion>> {
        naming::validate_id(id)?;
        let mut versions: Vec<ArchivedVersion> = self
            .backend
            .list_bases(Area::Archive)?
            .into_iter()
            .filter(|base| naming::belongs_to(base, id))
            .filter_map(|name| {
                let archived_at = naming::archive_stamp(&name)?.to_string();
                Some(ArchivedVersion {
                    id: id.to_string(),
                    archived_at,
                    name,
                })
            })
            .collect();
        versions.sort_by(|a, b| {
            naming::stamp_order(&a.archived_at)
                .cmp(&naming::stamp_order(&b.archived_at))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(versions)
    }

    fn write_lock(&self, id: &str) -> Arc<Mutex<()>> {
        lock(&self.write_locks)
            .entry(id.to_string())
            .or_default()
            .clone()
    }

    /// Drop the map's lock for `id` once no other writer holds or waits on it.
    fn release_write_lock(&self, id: &str, id_lock: Arc<Mutex<()>>) {
        let mut locks = lock(&self.write_locks);
        // clones are only taken under the map lock: two references means the map and us
        if Arc::strong_count(&id_lock) == 2 {
            locks.remove(id);
        }
    }

    #[cfg(test)]
    fn write_lock_count(&self) -> usize {
        lock(&self.write_locks).len()
    }

    /// The live base name for an id, found by scanning the live area.
    fn resolve(&self, id: &str) -> Result<Option<String>> {
        let mut matches: Vec<String> = self
            .backend
            .list_bases(Area::Live)?
            .into_iter()
            .filter(|base| naming::belongs_to(base, id))
            .collect();
        matches.sort();

        if matches.len() > 1 {
            log::warn!(
                "entry {} has {} live files, using {}",
                id,
                matches.len(),
                matches[0]
            );
        }
        log::debug!("resolved {} -> {:?}", id, matches.first());
        Ok(matches.into_iter().next())
    }

    /// Live base names that carry an id, sorted. Names sort by id first, so this is
    /// creation order and stable between calls.
    fn live_bases(&self) -> Result<Vec<String>> {
        let mut bases: Vec<String> = self
            .backend
            .list_bases(Area::Live)?
            .into_iter()
            .filter(|base| {
                let keep = naming::id_of(base).is_some();
                if !keep {
                    log::debug!("ignoring stray file {}", base);
                }
                keep
            })
            .collect();
        bases.sort();
        Ok(bases)
    }

    fn load(&self, base: &str) -> Result<Entry> {
        let missing = || JotError::NotFound(naming::id_of(base).unwrap_or(base).to_string());

        let meta = self
            .backend
            .read(Area::Live, base, FileKind::Meta)?
            .ok_or_else(missing)?;
        let mut entry: Entry = serde_json::from_str(&meta)?;

        // The content file wins over the Markdown copy inside the metadata.
        entry.markdown = self
            .backend
            .read(Area::Live, base, FileKind::Content)?
            .ok_or_else(missing)?;
        Ok(entry)
    }

    fn archive_pair(&self, id: &str, live: &str) -> Result<()> {
        let stamp = naming::generate_id();
        let archived = self.free_archive_base(live, &stamp)?;
        let archival_failed = |source| JotError::Archival {
            id: id.to_string(),
            source,
        };

        self.backend
            .archive(live, &archived, FileKind::Content)
            .map_err(archival_failed)?;

        if self.backend.exists(Area::Live, live, FileKind::Meta)? {
            if let Err(source) = self.backend.archive(live, &archived, FileKind::Meta) {
                if let Err(e) = self.backend.unarchive(&archived, live, FileKind::Content) {
                    log::error!("could not restore {} after failed archival: {}", live, e);
                }
                return Err(archival_failed(source));
            }
        } else {
            log::warn!("entry {} had no metadata file, archived content only", id);
        }

        log::info!("archived {} as {}", live, archived);
        Ok(())
    }

    fn free_archive_base(&self, live: &str, stamp: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            let candidate = naming::archive_base(live, stamp, attempt);
            let taken = self.backend.exists(Area::Archive, &candidate, FileKind::Content)?
                || self.backend.exists(Area::Archive, &candidate, FileKind::Meta)?;
            if !taken {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }

    /// Fails with [`JotError::Collision`] if either file of `base` is live.
    fn ensure_free(&self, base: &str) -> Result<()> {
        for kind in FileKind::ALL {
            if self.backend.exists(Area::Live, base, kind)? {
                return Err(JotError::Collision {
                    path: self.backend.path(Area::Live, base, kind),
                });
            }
        }
        Ok(())
    }

    fn write_pair(&self, base: &str, entry: &Entry) -> Result<()> {
        self.ensure_free(base)?;

        let meta = serde_json::to_string(entry)?;
        // Content first: a crash in between leaves an orphaned content file, never
        // metadata pointing at nothing.
        self.backend
            .write_new(base, FileKind::Content, &entry.markdown)?;
        self.backend.write_new(base, FileKind::Meta, &meta)?;

        log::debug!("wrote {}", base);
        Ok(())
    }
}
