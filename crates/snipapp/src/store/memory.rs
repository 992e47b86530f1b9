use super::mem_backend::MemBackend;
use super::snippet_store::SnippetStore;

pub type InMemoryStore = SnippetStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        SnippetStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---
