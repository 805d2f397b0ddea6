//! Guard rules.
//!
//! Each rule looks at the destination and the session and either decides
//! (`Some`) or defers to the next rule (`None`). The canonical order is:
//!
//! 1. [`PublicRouteCleanup`]: clears the session on public routes, never decides
//! 2. [`RequireSession`]: protected route without a session → login
//! 3. [`EntryRouteRedirect`]: entry route with a session → profile
//!
//! Anything left over is allowed by the guard itself.

use std::collections::HashSet;
use std::fmt;

use crate::guard::Decision;
use crate::observability::metrics;
use crate::routing::{Access, RouteDescriptor, RouteName};
use crate::session::SessionStore;

/// One step of the guard's ordered rule list.
pub trait GuardRule: Send + Sync + fmt::Debug {
    /// Stable identifier used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Return a decision to stop evaluation, or `None` to continue.
    fn evaluate(&self, destination: &RouteDescriptor, session: &mut dyn SessionStore) -> Option<Decision>;
}

/// Public routes (`requiresAuth: false`) always leave the app logged out,
/// even when the stored session is stale or only partially set.
#[derive(Debug, Default, Clone, Copy)]
pub struct PublicRouteCleanup;

impl GuardRule for PublicRouteCleanup {
    fn name(&self) -> &'static str {
        "public_route_cleanup"
    }

    fn evaluate(&self, destination: &RouteDescriptor, session: &mut dyn SessionStore) -> Option<Decision> {
        if destination.access() == Access::Public {
            let previous = session.snapshot();
            session.clear();

            if !previous.is_empty() {
                tracing::info!(route = %destination.name(), "Session cleared on public route");
                metrics::record_session_cleared();
            }
        }
        None
    }
}

/// Protected routes need a session.
#[derive(Debug, Clone)]
pub struct RequireSession {
    login: RouteName,
}

impl RequireSession {
    pub fn new(login: impl Into<RouteName>) -> Self {
        Self { login: login.into() }
    }
}

impl GuardRule for RequireSession {
    fn name(&self) -> &'static str {
        "require_session"
    }

    fn evaluate(&self, destination: &RouteDescriptor, session: &mut dyn SessionStore) -> Option<Decision> {
        (destination.access() == Access::Protected && !session.is_authenticated())
            .then(|| Decision::RedirectTo(self.login.clone()))
    }
}

/// Login and signup pages are for visitors without a session.
#[derive(Debug, Clone)]
pub struct EntryRouteRedirect {
    entry_routes: HashSet<RouteName>,
    profile: RouteName,
}

impl EntryRouteRedirect {
    pub fn new<I, N>(entry_routes: I, profile: impl Into<RouteName>) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<RouteName>,
    {
        Self {
            entry_routes: entry_routes.into_iter().map(Into::into).collect(),
            profile: profile.into(),
        }
    }
}

impl GuardRule for EntryRouteRedirect {
    fn name(&self) -> &'static str {
        "entry_route_redirect"
    }

    fn evaluate(&self, destination: &RouteDescriptor, session: &mut dyn SessionStore) -> Option<Decision> {
        (self.entry_routes.contains(destination.name()) && session.is_authenticated())
            .then(|| Decision::RedirectTo(self.profile.clone()))
    }
}
