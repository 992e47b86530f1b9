use snipapp::api::{Response, Route, SnipsApi, View};
use snipapp::error::ErrorKind;
use snipapp::session::{FlashKind, Session};
use snipapp::store::fs::FileStore;
use snipapp::store::DataStore;
use tempfile::TempDir;

fn api_in(dir: &TempDir) -> SnipsApi<FileStore> {
    SnipsApi::new(FileStore::new(dir.path().to_path_buf()))
}

/// Follow redirects the way a client would and return the final view.
fn follow(api: &SnipsApi<FileStore>, session: &mut Session, response: Response) -> View {
    let mut response = response;
    loop {
        match response {
            Response::Render(view) => return view,
            Response::Redirect(route) => response = api.get(session, route).unwrap(),
        }
    }
}

#[test]
fn alice_and_bob() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    let mut alice = Session::anonymous();
    let response = api
        .register(&mut alice, "alice", "secret1", "secret1")
        .unwrap();
    follow(&api, &mut alice, response);
    api.logout(&mut alice).unwrap();
    assert!(!alice.is_authenticated());

    let response = api.login(&mut alice, "alice", "secret1").unwrap();
    follow(&api, &mut alice, response);
    assert_eq!(alice.user(), Some("alice"));
    assert_eq!(alice.take_flash().unwrap().text, "You are logged in as 'alice'.");

    api.create(&mut alice, "print(1)".into()).unwrap();
    let snippet = api.store().get_snippet(1).unwrap();
    assert_eq!(snippet.owner, "alice");
    assert_eq!(snippet.value, "print(1)");

    let mut bob = Session::anonymous();
    api.register(&mut bob, "bob", "hunter22", "hunter22").unwrap();
    let response = api.update(&mut bob, 1, "x".into()).unwrap();
    assert!(matches!(response, Response::Redirect(Route::All)));
    let flash = bob.take_flash().unwrap();
    assert_eq!(flash.kind, FlashKind::Fail);
    assert_eq!(api.store().get_snippet(1).unwrap().value, "print(1)");

    api.delete(&mut alice, 1).unwrap();
    assert!(api.store().list_snippets().unwrap().is_empty());

    api.create(&mut alice, "print(2)".into()).unwrap();
    assert_eq!(api.store().get_snippet(1).unwrap().value, "print(2)");
}

#[test]
fn flash_is_shown_once() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);
    let mut session = Session::authenticated("alice");

    let response = api.create(&mut session, "print(1)".into()).unwrap();
    let view = follow(&api, &mut session, response);
    assert!(matches!(view, View::New { value: None }));

    assert!(session.take_flash().is_some());
    assert!(session.take_flash().is_none());
}

#[test]
fn update_then_show_returns_new_value() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);
    let mut session = Session::authenticated("alice");
    api.create(&mut session, "before".into()).unwrap();

    let response = api.update(&mut session, 1, "after".into()).unwrap();
    assert!(matches!(response, Response::Redirect(Route::Update(Some(1)))));

    for _ in 0..2 {
        match api.show(&mut session, 1).unwrap() {
            Response::Render(View::Snippet { snippet }) => assert_eq!(snippet.value, "after"),
            other => panic!("unexpected response {:?}", other),
        }
    }
}

#[test]
fn anonymous_gets_forbidden_error_view() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);
    let mut session = Session::anonymous();

    let route = Route::parse("/new").unwrap();
    let err = api.get(&mut session, route).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    match SnipsApi::<FileStore>::error_view(&err) {
        View::Error { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("unexpected view {:?}", other),
    }
}

#[test]
fn duplicate_registration_keeps_first_account() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    let mut first = Session::anonymous();
    api.register(&mut first, "alice", "secret1", "secret1")
        .unwrap();

    let mut second = Session::anonymous();
    let response = api
        .register(&mut second, "alice", "another1", "another1")
        .unwrap();
    assert!(matches!(response, Response::Render(View::Register { .. })));
    assert_eq!(
        second.take_flash().unwrap().text,
        "That username is taken."
    );
    assert!(!second.is_authenticated());

    let mut check = Session::anonymous();
    api.login(&mut check, "alice", "secret1").unwrap();
    assert_eq!(check.user(), Some("alice"));
}
