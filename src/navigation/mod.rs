//! Navigation gate: the routing engine's entry point.
//!
//! # Data Flow
//! ```text
//! on_before_navigate(destination, current)
//!     → RouteTable::resolve
//!     → fallback?  → Redirect(path of fallback target)
//!     → NavigationGuard::decide (may clear the session)
//!     → Proceed | Redirect(path)
//!
//! navigate(path)
//!     → on_before_navigate, re-entered for every redirect
//!     → Navigation (final route + hops) | RedirectLoop
//! ```
//!
//! # Design Decisions
//! - The fallback redirect happens before guarding; the redirected
//!   navigation is guarded when it re-enters the gate
//! - Redirect targets are logical names; the gate turns them into paths
//! - A target missing from the table is logged and sent to the fallback target
//! - Each navigation is evaluated independently

use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, RouteTableConfig};
use crate::guard::{Decision, NavigationGuard};
use crate::observability::metrics;
use crate::routing::{NavPath, RouteName, RouteTable};
use crate::session::SessionStore;

/// What the routing engine should do with a proposed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// Commit the navigation.
    Proceed,
    /// Navigate to this path instead (which passes through the gate again).
    Redirect(String),
}

/// One gate evaluation during [`NavigationGate::navigate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub path: String,
    pub route: RouteName,
    pub outcome: NavigationOutcome,
}

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Path originally requested.
    pub requested: String,
    /// Path the engine ends up on.
    pub path: String,
    /// Route rendered at `path`.
    pub route: RouteName,
    /// Every evaluation, including the final `Proceed`.
    pub hops: Vec<Hop>,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.hops.len() > 1
    }
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation to '{requested}' exceeded {limit} redirects (last: '{last}')")]
    RedirectLoop {
        requested: String,
        last: String,
        limit: usize,
    },
}

/// Route table, guard and session store wired together.
#[derive(Debug)]
pub struct NavigationGate<S> {
    table: RouteTable,
    guard: NavigationGuard,
    session: S,
    max_redirects: usize,
}

impl<S: SessionStore> NavigationGate<S> {
    pub fn new(table: RouteTable, guard: NavigationGuard, session: S) -> Self {
        Self {
            table,
            guard,
            session,
            max_redirects: crate::config::NavigationConfig::default().max_redirects,
        }
    }

    /// Validate `config`, compile the table and build the canonical guard.
    pub fn from_config(config: &RouteTableConfig, session: S) -> Result<Self, ConfigError> {
        let table = RouteTable::from_config(config)?;
        let guard = NavigationGuard::new(&table, &config.guard)?;
        Ok(Self::new(table, guard, session).with_max_redirects(config.navigation.max_redirects))
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects.max(1);
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Mutable access for authentication flows that set the session.
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Called by the routing engine before committing any navigation.
    pub fn on_before_navigate(&mut self, destination_path: &str, current_path: Option<&str>) -> NavigationOutcome {
        let span = tracing::debug_span!(
            "navigation",
            to = %destination_path,
            from = current_path.unwrap_or("")
        );
        let _enter = span.enter();

        let destination = self.table.resolve(destination_path);

        if let Some(target) = destination.redirect() {
            metrics::record_fallback();
            tracing::debug!(target = %target, "No route matched, using fallback");
            return NavigationOutcome::Redirect(self.target_path(target));
        }

        match self.guard.decide(destination, &mut self.session) {
            Decision::Allow => NavigationOutcome::Proceed,
            Decision::RedirectTo(target) => NavigationOutcome::Redirect(self.target_path(&target)),
        }
    }

    /// Navigate like the routing engine would: re-enter the gate for every
    /// redirect until a navigation proceeds.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let mut current: Option<String> = None;
        let mut next = NavPath::parse(path).as_str().to_string();
        let mut hops = Vec::new();

        loop {
            let outcome = self.on_before_navigate(&next, current.as_deref());
            hops.push(Hop {
                path: next.clone(),
                route: self.table.resolve(&next).name().clone(),
                outcome: outcome.clone(),
            });

            match outcome {
                NavigationOutcome::Proceed => {
                    let route = self.table.resolve(&next).name().clone();
                    return Ok(Navigation {
                        requested: path.to_string(),
                        path: next,
                        route,
                        hops,
                    });
                }
                NavigationOutcome::Redirect(target) => {
                    if hops.len() > self.max_redirects {
                        metrics::record_redirect_loop();
                        tracing::warn!(
                            requested = %path,
                            last = %target,
                            limit = self.max_redirects,
                            "Redirect loop detected"
                        );
                        return Err(NavigationError::RedirectLoop {
                            requested: path.to_string(),
                            last: target,
                            limit: self.max_redirects,
                        });
                    }
                    current = Some(std::mem::replace(&mut next, target));
                }
            }
        }
    }

    /// Path of a redirect target. Unknown targets (only reachable through
    /// extra guard rules) go where unmatched paths go.
    fn target_path(&self, target: &RouteName) -> String {
        if let Some(path) = self.table.path_of(target) {
            return path.to_string();
        }

        metrics::record_unknown_target();
        tracing::error!(target = %target, "Redirect target is not in the route table, using fallback");
        self.table
            .fallback()
            .redirect()
            .and_then(|fallback| self.table.path_of(fallback))
            // Validated tables always have a fallback target
            .unwrap_or("/")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionKey};

    fn gate() -> NavigationGate<MemorySessionStore> {
        NavigationGate::from_config(&RouteTableConfig::default(), MemorySessionStore::new()).unwrap()
    }

    #[test]
    fn test_unknown_path_redirects_to_fallback_target() {
        let mut gate = gate();
        assert_eq!(
            gate.on_before_navigate("/totally-unknown-path", Some("/")),
            NavigationOutcome::Redirect("/".into())
        );
    }

    #[test]
    fn test_protected_redirects_to_login_path() {
        let mut gate = gate();
        assert_eq!(
            gate.on_before_navigate("/map", None),
            NavigationOutcome::Redirect("/login".into())
        );
    }

    #[test]
    fn test_navigate_follows_redirects() {
        let mut gate = gate();
        let nav = gate.navigate("/voice-chat").unwrap();

        assert_eq!(nav.path, "/login");
        assert_eq!(nav.route, "Login");
        assert!(nav.redirected());
        assert_eq!(nav.hops.len(), 2);
        assert_eq!(nav.hops[0].outcome, NavigationOutcome::Redirect("/login".into()));
    }

    #[test]
    fn test_fallback_target_is_guarded() {
        let mut gate = gate();
        gate.session_mut().set(SessionKey::Token, "abc".into());

        // Unknown path → Home, which is public and logs the user out.
        let nav = gate.navigate("/nope").unwrap();
        assert_eq!(nav.route, "Home");
        assert!(!gate.session().is_authenticated());
    }

    #[test]
    fn test_public_entry_route_clears_instead_of_redirecting() {
        // CaregiverSignup is public: the session is gone before the
        // entry-route rule runs.
        let mut gate = gate();
        gate.session_mut().set(SessionKey::Token, "abc".into());

        let nav = gate.navigate("/caregiver-signup").unwrap();
        assert_eq!(nav.route, "CaregiverSignup");
        assert!(!nav.redirected());
    }

    #[test]
    fn test_redirect_loop_is_reported() {
        let mut config = RouteTableConfig::default();
        // Login without requires_auth keeps the session, so a signed-in user
        // is sent to Profile, and the extra rule sends Profile back to Login.
        for route in config.routes.iter_mut() {
            if route.name.as_deref() == Some("Login") {
                route.requires_auth = None;
            }
        }
        let table = RouteTable::from_config(&config).unwrap();
        let guard = NavigationGuard::new(&table, &config.guard)
            .unwrap()
            .with_rule(BounceProfile);
        let mut session = MemorySessionStore::new();
        session.set(SessionKey::Token, "abc".into());
        let mut gate = NavigationGate::new(table, guard, session).with_max_redirects(3);

        let err = gate.navigate("/login").unwrap_err();
        let NavigationError::RedirectLoop { requested, limit, .. } = err;
        assert_eq!(requested, "/login");
        assert_eq!(limit, 3);
    }

    #[test]
    fn test_rule_redirect_to_unknown_route_uses_fallback_target() {
        let config = RouteTableConfig::default();
        let table = RouteTable::from_config(&config).unwrap();
        let guard = NavigationGuard::new(&table, &config.guard)
            .unwrap()
            .with_rule(AlertsToNowhere);
        let mut gate = NavigationGate::new(table, guard, MemorySessionStore::new());

        assert_eq!(
            gate.on_before_navigate("/alerts", None),
            NavigationOutcome::Redirect("/".into())
        );
        let nav = gate.navigate("/alerts").unwrap();
        assert_eq!(nav.route, "Home");
    }

    #[derive(Debug)]
    struct AlertsToNowhere;

    impl crate::guard::GuardRule for AlertsToNowhere {
        fn name(&self) -> &'static str {
            "alerts_to_nowhere"
        }

        fn evaluate(
            &self,
            destination: &crate::routing::RouteDescriptor,
            _session: &mut dyn SessionStore,
        ) -> Option<Decision> {
            (destination.name() == "Alerts").then(|| Decision::redirect("Nowhere"))
        }
    }

    #[derive(Debug)]
    struct BounceProfile;

    impl crate::guard::GuardRule for BounceProfile {
        fn name(&self) -> &'static str {
            "bounce_profile"
        }

        fn evaluate(
            &self,
            destination: &crate::routing::RouteDescriptor,
            _session: &mut dyn SessionStore,
        ) -> Option<Decision> {
            (destination.name() == "Profile").then(|| Decision::redirect("Login"))
        }
    }
}
