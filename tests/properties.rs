//! Guard and route table properties over generated sessions and paths.

use proptest::prelude::*;
use route_gate::config::{GuardConfig, RouteTableConfig};
use route_gate::guard::{Decision, NavigationGuard};
use route_gate::routing::{Access, RouteTable};
use route_gate::session::{MemorySessionStore, SessionSnapshot, SessionStore};

fn canonical() -> (RouteTable, NavigationGuard) {
    let config = RouteTableConfig::default();
    let table = RouteTable::from_config(&config).unwrap();
    let guard = NavigationGuard::new(&table, &config.guard).unwrap();
    (table, guard)
}

/// Canonical table with the entry routes' `requires_auth` removed, so a
/// signed-in visitor keeps the session and meets the entry-route rule.
fn unrestricted_entries() -> (RouteTable, NavigationGuard) {
    let mut config = RouteTableConfig::default();
    let entries = GuardConfig::default().entry_routes;
    for route in config.routes.iter_mut() {
        if route.name.as_ref().is_some_and(|n| entries.contains(n)) {
            route.requires_auth = None;
        }
    }
    let table = RouteTable::from_config(&config).unwrap();
    let guard = NavigationGuard::new(&table, &config.guard).unwrap();
    (table, guard)
}

fn field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-z0-9]{1,12}".prop_map(Some),
    ]
}

fn any_session() -> impl Strategy<Value = SessionSnapshot> {
    (field(), field(), field()).prop_map(|(token, user_id, patient_id)| SessionSnapshot {
        token,
        user_id,
        patient_id,
    })
}

fn route_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "Home",
        "Login",
        "Signup",
        "CaregiverSignup",
        "Profile",
        "Calendar",
        "Map",
        "MedicalRecords",
        "VoiceChat",
        "Subscription",
        "Alerts",
        "AssignDeviceToPatient",
    ])
}

proptest! {
    #[test]
    fn public_routes_always_end_logged_out(snapshot in any_session(), name in route_name()) {
        let (table, guard) = canonical();
        let route = table.get(name).unwrap();
        prop_assume!(route.access() == Access::Public);

        let mut session = MemorySessionStore::from_snapshot(snapshot);
        guard.decide(route, &mut session);
        prop_assert!(session.snapshot().is_empty());
    }

    #[test]
    fn protected_without_token_goes_to_login(
        user_id in field(),
        patient_id in field(),
        name in route_name(),
    ) {
        let (table, guard) = canonical();
        let route = table.get(name).unwrap();
        prop_assume!(route.access() == Access::Protected);

        let mut session = MemorySessionStore::from_snapshot(SessionSnapshot { token: None, user_id, patient_id });
        prop_assert_eq!(guard.decide(route, &mut session), Decision::redirect("Login"));
    }

    #[test]
    fn protected_with_token_is_allowed(token in "[a-z0-9]{1,12}", name in route_name()) {
        let (table, guard) = canonical();
        let route = table.get(name).unwrap();
        prop_assume!(route.access() == Access::Protected);

        let mut session = MemorySessionStore::from_snapshot(SessionSnapshot {
            token: Some(token),
            ..SessionSnapshot::default()
        });
        prop_assert_eq!(guard.decide(route, &mut session), Decision::Allow);
    }

    #[test]
    fn signed_in_visitors_leave_entry_routes_for_profile(
        token in "[a-z0-9]{1,12}",
        name in prop::sample::select(vec!["Login", "Signup", "CaregiverSignup"]),
    ) {
        let (table, guard) = unrestricted_entries();
        let route = table.get(name).unwrap();

        let mut session = MemorySessionStore::from_snapshot(SessionSnapshot {
            token: Some(token),
            ..SessionSnapshot::default()
        });
        prop_assert_eq!(guard.decide(route, &mut session), Decision::redirect("Profile"));
    }

    #[test]
    fn decide_is_idempotent(snapshot in any_session(), name in route_name()) {
        let (table, guard) = canonical();
        let route = table.get(name).unwrap();

        let mut session = MemorySessionStore::from_snapshot(snapshot);
        let first = guard.decide(route, &mut session);
        let second = guard.decide(route, &mut session);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_paths_resolve_to_fallback(segment in "[a-z]{1,10}", depth in 1usize..4) {
        let (table, _) = canonical();
        let path = format!("/x-{}", vec![segment.as_str(); depth].join("/"));

        let route = table.resolve(&path);
        prop_assert!(route.is_fallback());
        prop_assert_eq!(route.redirect().map(|r| r.as_str()), Some("Home"));
    }

    #[test]
    fn resolve_never_panics(path in "\\PC{0,40}") {
        let (table, _) = canonical();
        let _ = table.resolve(&path);
    }
}
