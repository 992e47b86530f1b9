use super::fs_backend::FsBackend;
use super::snippet_store::SnippetStore;
use std::path::{Path, PathBuf};

pub type FileStore = SnippetStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        SnippetStore::with_backend(FsBackend::new(root))
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snippet;
    use crate::store::DataStore;
    use tempfile::TempDir;

    #[test]
    fn missing_directory_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("not-yet"));
        assert!(store.list_snippets().unwrap().is_empty());
        assert!(store.find_user("alice").unwrap().is_none());
    }

    #[test]
    fn first_write_creates_directory_and_lock() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data");
        let store = FileStore::new(root.clone());

        store
            .insert_snippet(&Snippet::new(1, "print(1)".into(), "alice".into()))
            .unwrap();

        assert!(root.join("snippets.json").exists());
        assert!(root.join("LOCK").exists());
        assert_eq!(store.root(), root.as_path());
    }
}
