use super::*;

#[test]
fn memory_store_sign_in_and_out() {
    let store = MemorySessionStore::new();
    assert!(store.credential().is_none());

    store.sign_in("abc123", "maria").expect("sign in");
    assert_eq!(store.credential().as_deref(), Some("abc123"));
    assert_eq!(store.user().map(|u| u.username).as_deref(), Some("maria"));

    store.sign_out().expect("sign out");
    assert!(store.credential().is_none());
    assert!(store.user().is_none());
}

#[test]
fn blank_token_is_rejected_and_treated_as_absent() {
    let store = MemorySessionStore::new();
    assert!(store.sign_in("   ", "maria").is_err());

    let store = MemorySessionStore::with_token("  ");
    assert!(store.credential().is_none());
}

#[test]
fn file_store_persists_under_fixed_keys() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("session.json");
    let store = FileSessionStore::new(&path);

    store.sign_in("tok-1", "joao").expect("sign in");
    assert!(path.exists(), "session file should be created: {}", path.display());

    let raw = std::fs::read_to_string(&path).expect("read");
    let entries: BTreeMap<String, String> = serde_json::from_str(&raw).expect("json");
    assert_eq!(entries.get(TOKEN_KEY).map(String::as_str), Some("tok-1"));
    assert!(entries.contains_key(USER_KEY));

    let reopened = FileSessionStore::new(&path);
    assert_eq!(reopened.credential().as_deref(), Some("tok-1"));
    assert_eq!(reopened.user().map(|u| u.username).as_deref(), Some("joao"));
}

#[test]
fn file_store_sign_out_removes_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session.json");
    let store = FileSessionStore::new(&path);

    store.sign_in("tok-1", "joao").expect("sign in");
    store.sign_out().expect("sign out");

    assert!(!path.exists());
    assert!(store.credential().is_none());
}

#[test]
fn file_store_keeps_unrelated_keys_on_sign_out() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session.json");
    let store = FileSessionStore::new(&path);

    store.set("theme", "dark".to_string()).expect("set");
    store.sign_in("tok-1", "joao").expect("sign in");
    store.sign_out().expect("sign out");

    assert_eq!(store.get("theme").expect("get").as_deref(), Some("dark"));
    assert!(store.credential().is_none());
}

#[test]
fn malformed_file_reads_as_signed_out() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").expect("write");

    let store = FileSessionStore::new(&path);
    assert!(store.get(TOKEN_KEY).is_err());
    assert!(store.credential().is_none());
}
