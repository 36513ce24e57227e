//! # API Facade
//!
//! The API layer is a **thin facade** over the entry store. It is the single entry
//! point for every UI (the `jot` CLI today; a web front end would sit in the same
//! place).
//!
//! ## Role and Responsibilities
//!
//! - **Shapes calls** the way a UI thinks of them ("create", "edit", "view as HTML")
//!   and maps them onto the store's single `store` operation.
//! - **Returns structured types**: entries and search records, never strings meant
//!   for a terminal.
//!
//! ## Generic Over StorageBackend
//!
//! `JotApi` wraps an [`EntryStore`] over any backend:
//! - Production: `JotApi<FileStore>`
//! - Testing: `JotApi<InMemoryStore>`

use crate::error::Result;
use crate::model::{ArchivedVersion, Entry, SearchMatch};
use crate::render;
use crate::store::{Cancellation, EntryStore, StorageBackend};

pub struct JotApi<S> {
    store: S,
}

impl<B: StorageBackend> JotApi<EntryStore<B>> {
    pub fn new(store: EntryStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EntryStore<B> {
        &self.store
    }

    pub fn create(&self, title: &str, markdown: &str) -> Result<Entry> {
        let entry = self.store.store(&Entry::new(title, markdown))?;
        log::info!("created entry {}", entry.id);
        Ok(entry)
    }

    /// Replace an entry's content, keeping its title unless a new one is given.
    /// Without a title the entry must already exist.
    pub fn update(&self, id: &str, title: Option<&str>, markdown: &str) -> Result<Entry> {
        let title = match title {
            Some(title) => title.to_string(),
            None => self.store.get(id)?.title,
        };
        let entry = self
            .store
            .store(&Entry::new(title, markdown).with_id(id))?;
        log::info!("updated entry {}", entry.id);
        Ok(entry)
    }

    pub fn get(&self, id: &str) -> Result<Entry> {
        self.store.get(id)
    }

    /// The entry's markdown rendered to HTML.
    pub fn render(&self, id: &str) -> Result<String> {
        let entry = self.store.get(id)?;
        Ok(render::to_html(&entry.markdown))
    }

    pub fn list(&self) -> Result<Vec<Entry>> {
        self.store.list()
    }

    pub fn list_with(&self, cancel: &Cancellation) -> Result<Vec<Entry>> {
        self.store.list_with(cancel)
    }

    pub fn search(&self, pattern: &str) -> Result<Vec<SearchMatch>> {
        self.store.search(pattern)
    }

    pub fn search_with(&self, pattern: &str, cancel: &Cancellation) -> Result<Vec<SearchMatch>> {
        self.store.search_with(pattern, cancel)
    }

    /// Archived versions of an existing entry. Unknown ids are `NotFound`.
    pub fn history(&self, id: &str) -> Result<Vec<ArchivedVersion>> {
        let versions = self.store.history(id)?;
        if versions.is_empty() {
            // distinguish "never updated" from "no such entry"
            self.store.get(id)?;
        }
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn api() -> JotApi<InMemoryStore> {
        JotApi::new(InMemoryStore::new())
    }

    fn api_with(fixture: StoreFixture) -> JotApi<InMemoryStore> {
        JotApi::new(fixture.store)
    }

    #[test]
    fn create_assigns_id_and_persists() {
        let api = api();
        let entry = api.create("Title", "body").unwrap();
        assert!(entry.has_id());
        assert_eq!(api.get(&entry.id).unwrap().markdown, "body");
    }

    #[test]
    fn update_without_title_keeps_current_title() {
        let api = api_with(StoreFixture::new().with_entry("1", "Keep me", "v1"));

        let updated = api.update("1", None, "v2").unwrap();
        assert_eq!(updated.title, "Keep me");
        assert_eq!(api.get("1").unwrap().markdown, "v2");
        assert_eq!(api.history("1").unwrap().len(), 1);
    }

    #[test]
    fn update_with_title_renames() {
        let api = api_with(StoreFixture::new().with_entry("1", "Old", "v1"));
        api.update("1", Some("New"), "v2").unwrap();
        assert_eq!(api.get("1").unwrap().title, "New");
        assert_eq!(api.list().unwrap().len(), 1);
    }

    #[test]
    fn update_of_missing_entry_without_title_is_not_found() {
        let api = api();
        assert!(api.update("404", None, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn render_returns_html() {
        let api = api_with(StoreFixture::new().with_entry("1", "t", "**bold**"));
        assert!(api.render("1").unwrap().contains("<strong>bold</strong>"));
    }

    #[test]
    fn history_distinguishes_unknown_from_unchanged() {
        let api = api_with(StoreFixture::new().with_entry("1", "t", "x"));
        assert!(api.history("1").unwrap().is_empty());
        assert!(api.history("2").unwrap_err().is_not_found());
    }

    #[test]
    fn list_returns_entries_in_id_order() {
        let api = api_with(StoreFixture::new().with_entries(3));
        let titles: Vec<String> = api.list().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Entry 1", "Entry 2", "Entry 3"]);
    }

    #[test]
    fn search_delegates_to_store() {
        let api = api_with(StoreFixture::new().with_entry("1", "t", "alpha\nbeta"));
        let results = api.search("^b").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lines, vec!["beta"]);
    }
}
