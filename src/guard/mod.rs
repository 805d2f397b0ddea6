//! Navigation guard.
//!
//! # Data Flow
//! ```text
//! destination descriptor + session store
//!     → rules.rs, evaluated top to bottom
//!         PublicRouteCleanup  (mutates session, never decides)
//!         RequireSession      (→ login)
//!         EntryRouteRedirect  (→ profile)
//!         ...extra rules
//!     → first Some(decision) wins, otherwise Allow
//! ```
//!
//! # Design Decisions
//! - The guard holds no session state; the store is passed in per call
//! - Cleanup runs before any decision, so later rules see the cleared session
//! - A destination from another table is a caller bug and panics
//! - Guard roles naming routes outside the table are rejected at construction

pub mod decision;
pub mod rules;

use std::collections::HashMap;

pub use decision::Decision;
pub use rules::{EntryRouteRedirect, GuardRule, PublicRouteCleanup, RequireSession};

use crate::config::{ConfigError, GuardConfig, ValidationError};
use crate::observability::metrics;
use crate::routing::{RouteDescriptor, RouteName, RouteTable};
use crate::session::SessionStore;

/// Decides whether a navigation proceeds or is redirected.
#[derive(Debug)]
pub struct NavigationGuard {
    rules: Vec<Box<dyn GuardRule>>,
    known: HashMap<RouteName, RouteDescriptor>,
}

impl NavigationGuard {
    /// Build the guard with the canonical rule order for `table`.
    ///
    /// Fails if `config` names a login, profile or entry route that is not in
    /// `table`.
    pub fn new(table: &RouteTable, config: &GuardConfig) -> Result<Self, ConfigError> {
        let roles = [("guard.login", &config.login), ("guard.profile", &config.profile)]
            .into_iter()
            .chain(config.entry_routes.iter().map(|name| ("guard.entry_routes", name)));
        let errors: Vec<ValidationError> = roles
            .filter(|(_, name)| table.get(name).is_none())
            .map(|(role, name)| ValidationError::UnknownRoute {
                role,
                name: name.clone(),
            })
            .collect();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let rules: Vec<Box<dyn GuardRule>> = vec![
            Box::new(PublicRouteCleanup),
            Box::new(RequireSession::new(config.login.as_str())),
            Box::new(EntryRouteRedirect::new(
                config.entry_routes.iter().map(String::as_str),
                config.profile.as_str(),
            )),
        ];

        Ok(Self {
            rules,
            known: table.iter().map(|r| (r.name().clone(), r.clone())).collect(),
        })
    }

    /// Append a rule. It runs after the canonical rules and before the
    /// default `Allow`. A redirect to a route outside the table is sent to the
    /// fallback target by the gate.
    pub fn with_rule(mut self, rule: impl GuardRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Decide a navigation to `destination`.
    ///
    /// # Panics
    /// If `destination` is not a descriptor of the table this guard was
    /// built from.
    pub fn decide(&self, destination: &RouteDescriptor, session: &mut dyn SessionStore) -> Decision {
        assert!(
            self.known.get(destination.name()) == Some(destination),
            "route '{}' ({}) is not part of the guarded route table",
            destination.name(),
            destination.pattern()
        );

        let mut decided = (Decision::Allow, "default");
        for rule in &self.rules {
            if let Some(decision) = rule.evaluate(destination, session) {
                decided = (decision, rule.name());
                break;
            }
        }
        let (decision, rule) = decided;

        tracing::debug!(
            route = %destination.name(),
            rule,
            decision = %decision,
            "Navigation decided"
        );
        metrics::record_decision(decision.label(), rule);

        decision
    }
}
