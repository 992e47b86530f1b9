use super::backend::StorageBackend;
use super::DataStore;
use crate::error::{Result, SnipError};
use crate::model::{Snippet, User};

pub struct SnippetStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> SnippetStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn snippet_not_found(id: u64) -> SnipError {
    SnipError::NotFound(format!("No code snippet with ID {} exists.", id))
}

impl<B: StorageBackend> DataStore for SnippetStore<B> {
    fn next_sequence_value(&self, name: &str) -> Result<u64> {
        self.backend.exclusive(|| {
            let mut counters = self.backend.load_counters()?;
            // An absent counter means nothing was ever issued: hand out 1 and store 2.
            let value = counters.get(name).copied().unwrap_or(1);
            counters.insert(name.to_string(), value + 1);
            self.backend.save_counters(&counters)?;
            Ok(value)
        })
    }

    fn reset_sequence(&self, name: &str) -> Result<()> {
        self.backend.exclusive(|| {
            let mut counters = self.backend.load_counters()?;
            counters.insert(name.to_string(), 1);
            self.backend.save_counters(&counters)
        })
    }

    fn reset_sequence_if_empty(&self, name: &str) -> Result<bool> {
        self.backend.exclusive(|| {
            if !self.backend.load_snippets()?.is_empty() {
                return Ok(false);
            }
            let mut counters = self.backend.load_counters()?;
            counters.insert(name.to_string(), 1);
            self.backend.save_counters(&counters)?;
            Ok(true)
        })
    }

    fn insert_snippet(&self, snippet: &Snippet) -> Result<()> {
        self.backend.exclusive(|| {
            let mut snippets = self.backend.load_snippets()?;
            if snippets.contains_key(&snippet.id) {
                return Err(SnipError::Conflict(format!(
                    "A code snippet with ID {} already exists.",
                    snippet.id
                )));
            }
            snippets.insert(snippet.id, snippet.clone());
            self.backend.save_snippets(&snippets)
        })
    }

    fn update_snippet(&self, snippet: &Snippet) -> Result<()> {
        self.backend.exclusive(|| {
            let mut snippets = self.backend.load_snippets()?;
            match snippets.get_mut(&snippet.id) {
                Some(existing) => *existing = snippet.clone(),
                None => return Err(snippet_not_found(snippet.id)),
            }
            self.backend.save_snippets(&snippets)
        })
    }

    fn get_snippet(&self, id: u64) -> Result<Snippet> {
        let snippets = self.backend.load_snippets()?;
        snippets.get(&id).cloned().ok_or_else(|| snippet_not_found(id))
    }

    fn list_snippets(&self) -> Result<Vec<Snippet>> {
        Ok(self.backend.load_snippets()?.into_values().collect())
    }

    fn delete_snippet(&self, id: u64) -> Result<usize> {
        self.backend.exclusive(|| {
            let mut snippets = self.backend.load_snippets()?;
            if snippets.remove(&id).is_none() {
                return Err(snippet_not_found(id));
            }
            self.backend.save_snippets(&snippets)?;
            Ok(snippets.len())
        })
    }

    fn insert_user(&self, user: &User) -> Result<()> {
        self.backend.exclusive(|| {
            let mut users = self.backend.load_users()?;
            if users.contains_key(&user.username) {
                return Err(SnipError::Conflict("That username is taken.".to_string()));
            }
            users.insert(user.username.clone(), user.clone());
            self.backend.save_users(&users)
        })
    }

    fn find_user(&self, username: &str) -> Result<Option<User>> {
        Ok(self.backend.load_users()?.remove(username))
    }

    fn clear(&self) -> Result<()> {
        self.backend.exclusive(|| self.backend.wipe())
    }
}
