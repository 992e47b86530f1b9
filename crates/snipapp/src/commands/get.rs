use crate::commands::{CmdResult, ListedSnippet};
use crate::error::Result;
use crate::store::DataStore;
use chrono::Utc;

pub fn run<S: DataStore>(store: &S, id: u64) -> Result<CmdResult> {
    let snippet = store.get_snippet(id)?;
    let listed = ListedSnippet::from_snippet(snippet, Utc::now());
    Ok(CmdResult::default().with_listed_snippets(vec![listed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn returns_the_snippet() {
        let fixture = StoreFixture::new().with_snippet("alice", "print(1)");
        let result = run(&fixture.store, 1).unwrap();
        assert_eq!(result.listed_snippets[0].value, "print(1)");
        assert_eq!(result.listed_snippets[0].owner, "alice");
    }

    #[test]
    fn missing_id_is_not_found() {
        let fixture = StoreFixture::new();
        let err = run(&fixture.store, 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn repeated_reads_change_nothing() {
        let fixture = StoreFixture::new().with_snippet("alice", "print(1)");
        let before = fixture.store.list_snippets().unwrap();
        for _ in 0..3 {
            run(&fixture.store, 1).unwrap();
        }
        assert_eq!(fixture.store.list_snippets().unwrap(), before);
    }
}
