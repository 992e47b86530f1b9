use snipapp::error::ErrorKind;
use snipapp::model::{Snippet, User};
use snipapp::sequence;
use snipapp::store::fs::FileStore;
use snipapp::store::DataStore;
use std::collections::HashSet;
use std::fs;
use std::thread;
use tempfile::TempDir;

#[test]
fn data_survives_a_new_store_instance() {
    let dir = TempDir::new().unwrap();
    {
        let store = FileStore::new(dir.path().to_path_buf());
        let id = sequence::allocate(&store).unwrap();
        store
            .insert_snippet(&Snippet::new(id, "fn main() {}".into(), "alice".into()))
            .unwrap();
        store
            .insert_user(&User::new("alice".into(), "hash".into()))
            .unwrap();
    }

    let reopened = FileStore::new(dir.path().to_path_buf());
    let snippet = reopened.get_snippet(1).unwrap();
    assert_eq!(snippet.value, "fn main() {}");
    assert_eq!(snippet.owner, "alice");
    assert!(reopened.find_user("alice").unwrap().is_some());
    // the counter persisted too
    assert_eq!(sequence::allocate(&reopened).unwrap(), 2);
}

#[test]
fn writes_leave_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    for value in ["a", "b", "c"] {
        let id = sequence::allocate(&store).unwrap();
        store
            .insert_snippet(&Snippet::new(id, value.into(), "alice".into()))
            .unwrap();
    }

    let leftovers: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found {:?}", leftovers);
}

#[test]
fn separate_handles_never_share_an_id() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let root = root.clone();
            thread::spawn(move || {
                let store = FileStore::new(root);
                (0..25)
                    .map(|_| sequence::allocate(&store).unwrap())
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "id {} handed out twice", id);
        }
    }
    assert_eq!(seen.len(), 100);
    assert_eq!(seen.iter().max(), Some(&100));
}

#[test]
fn deleting_the_last_snippet_and_resetting_restarts_numbering() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    let id = sequence::allocate(&store).unwrap();
    store
        .insert_snippet(&Snippet::new(id, "a".into(), "alice".into()))
        .unwrap();

    assert_eq!(store.delete_snippet(id).unwrap(), 0);
    sequence::reset(&store).unwrap();

    let reopened = FileStore::new(dir.path().to_path_buf());
    assert_eq!(sequence::allocate(&reopened).unwrap(), 1);
}

#[test]
fn unusable_root_is_storage_unavailable() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "not a directory").unwrap();

    let store = FileStore::new(blocker.join("data"));
    let err = sequence::allocate(&store).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    assert_eq!(err.status(), 500);
    assert!(!err.is_recoverable());
}

#[test]
fn corrupt_file_is_storage_unavailable() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("snippets.json"), "{ not json").unwrap();

    let store = FileStore::new(dir.path().to_path_buf());
    let err = store.list_snippets().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
}
