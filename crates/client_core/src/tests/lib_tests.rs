use super::*;
use shared::domain::{FilterPatch, SortField, SortOrder};

#[test]
fn from_settings_uses_configured_session_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("session.json");
    let settings = Settings {
        session_file: Some(path.clone()),
        ..Settings::default()
    };

    let client = CatalogClient::from_settings(settings).expect("client");
    client.session.sign_in("tok", "ana").expect("sign in");

    assert!(path.exists());
    assert_eq!(
        FileSessionStore::new(&path).credential().as_deref(),
        Some("tok")
    );
}

#[test]
fn invalid_api_url_is_rejected_at_wiring_time() {
    let settings = Settings {
        api_url: "mailto:shop@example.com".to_string(),
        ..Settings::default()
    };
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    assert!(CatalogClient::with_session(settings, session).is_err());
}

#[tokio::test]
async fn store_follows_configured_pagination() {
    let settings = Settings {
        pagination: PaginationMode::Client,
        items_per_page: 4,
        ..Settings::default()
    };
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_token("t"));
    let mut client = CatalogClient::with_session(settings, session).expect("client");

    assert_eq!(client.store.mode(), PaginationMode::Client);
    assert_eq!(client.store.snapshot().await.items_per_page, 4);
    assert_eq!(client.guard.check("/"), GuardDecision::Render);
    assert!(!client.initial_load.has_started());

    client
        .store
        .set_filters(FilterPatch::sort(SortField::Price, SortOrder::Descending))
        .await;
    assert_eq!(client.store.filters().await.sort_field, SortField::Price);
}
