use super::entry_store::EntryStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = EntryStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        EntryStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::model::Entry;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Entries with ids `1..=count`, titled `Entry N`.
        pub fn with_entries(self, count: usize) -> Self {
            for i in 1..=count {
                let entry = Entry::new(format!("Entry {}", i), format!("Content for entry {}", i))
                    .with_id(i.to_string());
                self.store.store(&entry).unwrap();
            }
            self
        }

        pub fn with_entry(self, id: &str, title: &str, markdown: &str) -> Self {
            self.store
                .store(&Entry::new(title, markdown).with_id(id))
                .unwrap();
            self
        }
    }
}
