use super::*;
use crate::session::MemorySessionStore;

fn guard_with(store: MemorySessionStore) -> (SessionGuard, Arc<MemorySessionStore>) {
    let store = Arc::new(store);
    (SessionGuard::new(store.clone()), store)
}

#[test]
fn starts_unknown_and_renders_loading_only() {
    let (guard, _) = guard_with(MemorySessionStore::with_token("t"));
    assert_eq!(guard.state(), GuardState::Unknown);
    assert_eq!(guard.decision(), GuardDecision::Loading);
}

#[test]
fn no_credential_on_root_redirects_to_login() {
    let (mut guard, _) = guard_with(MemorySessionStore::new());
    assert_eq!(
        guard.check("/"),
        GuardDecision::Redirect(LOGIN_ROUTE.to_string())
    );
    assert_eq!(guard.state(), GuardState::Unauthenticated);
}

#[test]
fn credential_on_login_redirects_to_root() {
    let (mut guard, _) = guard_with(MemorySessionStore::with_token("t"));
    assert_eq!(
        guard.check("/login"),
        GuardDecision::Redirect(DEFAULT_ROUTE.to_string())
    );
    assert_eq!(guard.state(), GuardState::Authenticated);
}

#[test]
fn login_page_renders_when_signed_out() {
    let (mut guard, _) = guard_with(MemorySessionStore::new());
    assert_eq!(guard.check("/login/"), GuardDecision::Render);
}

#[test]
fn protected_route_renders_when_signed_in() {
    let (mut guard, _) = guard_with(MemorySessionStore::with_token("t"));
    assert_eq!(guard.check("/products?page=2"), GuardDecision::Render);
    assert_eq!(guard.active_route(), Some("/products"));
}

#[test]
fn navigate_rechecks_when_route_changes() {
    let (mut guard, store) = guard_with(MemorySessionStore::with_token("t"));
    assert_eq!(guard.navigate("/"), GuardDecision::Render);

    store.sign_out().expect("sign out");
    // Same route: no re-check, previous decision stands.
    assert_eq!(guard.navigate("/"), GuardDecision::Render);
    // Route changed: credential re-read.
    assert_eq!(
        guard.navigate("/products"),
        GuardDecision::Redirect(LOGIN_ROUTE.to_string())
    );
}

#[test]
fn resolve_follows_redirects() {
    let (mut guard, _) = guard_with(MemorySessionStore::new());
    assert_eq!(guard.resolve("/"), LOGIN_ROUTE);

    let (mut guard, _) = guard_with(MemorySessionStore::with_token("t"));
    assert_eq!(guard.resolve("/login"), DEFAULT_ROUTE);
}

#[test]
fn normalizes_routes() {
    assert_eq!(normalize_route(""), "/");
    assert_eq!(normalize_route("login"), "/login");
    assert_eq!(normalize_route("/login/"), "/login");
    assert_eq!(normalize_route("/?x=1"), "/");
}
