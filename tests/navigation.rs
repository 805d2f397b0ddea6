//! End-to-end navigation scenarios over the canonical route table.

use route_gate::guard::Decision;
use route_gate::session::{MemorySessionStore, SessionKey, SessionSnapshot, SessionStore};
use route_gate::NavigationOutcome;

mod common;

use common::{canonical_gate, full_session, session};

#[test]
fn test_login_with_full_session_clears_and_allows() {
    let mut gate = canonical_gate(full_session());

    let outcome = gate.on_before_navigate("/login", Some("/profile"));

    // Cleanup runs first, so the entry-route rule no longer sees a token.
    assert_eq!(outcome, NavigationOutcome::Proceed);
    assert!(gate.session().snapshot().is_empty());
}

#[test]
fn test_profile_without_session_redirects_to_login() {
    let mut gate = canonical_gate(SessionSnapshot::default());

    let login = gate.table().get("Login").unwrap().clone();
    let profile = gate.table().resolve("/profile").clone();
    let decision = gate.guard().decide(&profile, &mut MemorySessionStore::new());
    assert_eq!(decision, Decision::RedirectTo(login.name().clone()));

    assert_eq!(
        gate.on_before_navigate("/profile", None),
        NavigationOutcome::Redirect("/login".into())
    );
}

#[test]
fn test_calendar_with_token_is_allowed() {
    let mut gate = canonical_gate(session(Some("abc"), None, None));

    assert_eq!(gate.on_before_navigate("/calendar", Some("/")), NavigationOutcome::Proceed);
    assert_eq!(gate.session().get(SessionKey::Token).as_deref(), Some("abc"));
}

#[test]
fn test_every_protected_route_requires_a_token() {
    let protected = ["/profile", "/calendar", "/map", "/medical-records", "/voice-chat"];

    for path in protected {
        let mut gate = canonical_gate(SessionSnapshot::default());
        assert_eq!(
            gate.on_before_navigate(path, None),
            NavigationOutcome::Redirect("/login".into()),
            "{path} should redirect"
        );

        let mut gate = canonical_gate(session(Some("abc"), None, None));
        assert_eq!(gate.on_before_navigate(path, None), NavigationOutcome::Proceed, "{path}");
    }
}

#[test]
fn test_unrestricted_routes_keep_whatever_session_exists() {
    for path in ["/subscription", "/alerts", "/assign-device"] {
        let mut gate = canonical_gate(full_session());
        assert_eq!(gate.on_before_navigate(path, None), NavigationOutcome::Proceed);
        assert_eq!(gate.session().snapshot(), full_session());

        let mut gate = canonical_gate(SessionSnapshot::default());
        assert_eq!(gate.on_before_navigate(path, None), NavigationOutcome::Proceed);
    }
}

#[test]
fn test_stale_satellite_fields_are_cleared_on_public_routes() {
    // userId / patientId without a token
    let mut gate = canonical_gate(session(None, Some("1"), Some("2")));

    assert_eq!(gate.on_before_navigate("/", None), NavigationOutcome::Proceed);
    assert!(gate.session().snapshot().is_empty());
}

#[test]
fn test_unknown_path_lands_on_home() {
    let mut gate = canonical_gate(SessionSnapshot::default());

    assert_eq!(
        gate.on_before_navigate("/totally-unknown-path", None),
        NavigationOutcome::Redirect("/".into())
    );

    let nav = gate.navigate("/totally-unknown-path").unwrap();
    assert_eq!(nav.route, "Home");
    assert_eq!(nav.path, "/");
    assert_eq!(nav.hops.len(), 2);
}

#[test]
fn test_login_flow() {
    let mut gate = canonical_gate(SessionSnapshot::default());

    // Visitor is bounced to login.
    let nav = gate.navigate("/medical-records").unwrap();
    assert_eq!(nav.route, "Login");

    // Authentication flow (outside the gate) stores the session.
    gate.session_mut().set(SessionKey::Token, "abc".into());
    gate.session_mut().set(SessionKey::UserId, "1".into());
    gate.session_mut().set(SessionKey::PatientId, "2".into());

    let nav = gate.navigate("/medical-records").unwrap();
    assert_eq!(nav.route, "MedicalRecords");
    assert!(!nav.redirected());

    // Going home logs out.
    let nav = gate.navigate("/").unwrap();
    assert_eq!(nav.route, "Home");
    assert!(!gate.session().is_authenticated());

    let nav = gate.navigate("/medical-records").unwrap();
    assert_eq!(nav.route, "Login");
}

#[test]
fn test_query_and_trailing_slash_are_ignored() {
    let mut gate = canonical_gate(session(Some("abc"), None, None));

    let nav = gate.navigate("/calendar/?view=week#today").unwrap();
    assert_eq!(nav.route, "Calendar");
    assert_eq!(nav.path, "/calendar");
}
