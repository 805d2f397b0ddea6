//! Shared helpers for integration tests.

use route_gate::config::RouteTableConfig;
use route_gate::session::{MemorySessionStore, SessionSnapshot};
use route_gate::NavigationGate;

/// Gate over the canonical table with the given session.
pub fn canonical_gate(session: SessionSnapshot) -> NavigationGate<MemorySessionStore> {
    NavigationGate::from_config(&RouteTableConfig::default(), MemorySessionStore::from_snapshot(session)).unwrap()
}

/// Session with every field present.
pub fn full_session() -> SessionSnapshot {
    session(Some("abc"), Some("1"), Some("2"))
}

pub fn session(token: Option<&str>, user_id: Option<&str>, patient_id: Option<&str>) -> SessionSnapshot {
    SessionSnapshot {
        token: token.map(str::to_string),
        user_id: user_id.map(str::to_string),
        patient_id: patient_id.map(str::to_string),
    }
}
