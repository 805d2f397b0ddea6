//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled route descriptors in configuration order
//! - Resolve a requested path to exactly one descriptor
//! - Look up descriptors and their paths by logical name
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(1) exact-path lookup via HashMap before any pattern scan
//! - O(n) pattern scan for parameterized routes (acceptable for typical route counts)
//! - No NoMatch: the fallback descriptor is returned instead

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::config::schema::{RouteTableConfig, FALLBACK_NAME};
use crate::config::validation::{validate_config, ValidationError};
use crate::config::ConfigError;
use crate::routing::pattern::{NavPath, Params, PathPattern, Specificity};

/// Stable logical identity of a destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteName(String);

impl RouteName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for RouteName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RouteName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Session requirement of a destination (`requiresAuth`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// `requiresAuth: true`: a session must exist.
    Protected,
    /// `requiresAuth: false`: visiting clears the session.
    Public,
    /// `requiresAuth` absent: no requirement, no cleanup.
    Unrestricted,
}

impl From<Option<bool>> for Access {
    fn from(requires_auth: Option<bool>) -> Self {
        match requires_auth {
            Some(true) => Access::Protected,
            Some(false) => Access::Public,
            None => Access::Unrestricted,
        }
    }
}

/// One navigable destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    #[serde(serialize_with = "serialize_pattern")]
    pattern: PathPattern,
    name: RouteName,
    access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<RouteName>,
}

fn serialize_pattern<S: serde::Serializer>(pattern: &PathPattern, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(pattern.as_str())
}

impl RouteDescriptor {
    pub fn new(pattern: PathPattern, name: impl Into<RouteName>, access: Access) -> Self {
        Self {
            pattern,
            name: name.into(),
            access,
            redirect: None,
        }
    }

    /// The catch-all descriptor redirecting to `target`.
    pub fn fallback(target: impl Into<RouteName>) -> Self {
        Self {
            pattern: PathPattern::catch_all(),
            name: RouteName::new(FALLBACK_NAME),
            access: Access::Unrestricted,
            redirect: Some(target.into()),
        }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn name(&self) -> &RouteName {
        &self.name
    }

    pub fn access(&self) -> Access {
        self.access
    }

    /// Redirect target; only the fallback has one.
    pub fn redirect(&self) -> Option<&RouteName> {
        self.redirect.as_ref()
    }

    pub fn is_fallback(&self) -> bool {
        self.pattern.is_catch_all()
    }
}

/// Result of resolving a path: the descriptor and any captured parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub descriptor: &'a RouteDescriptor,
    pub params: Params,
}

/// Immutable, validated route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    exact: HashMap<String, usize>,
    by_name: HashMap<RouteName, usize>,
    fallback: usize,
}

impl RouteTable {
    /// Validate `config` and compile its routes.
    pub fn from_config(config: &RouteTableConfig) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let mut routes = Vec::with_capacity(config.routes.len());
        for entry in &config.routes {
            let descriptor = match (&entry.redirect, &entry.name) {
                (Some(target), _) if entry.is_catch_all() => RouteDescriptor::fallback(target.as_str()),
                (_, Some(name)) => {
                    let pattern = PathPattern::parse(&entry.path).map_err(|source| {
                        ConfigError::Validation(vec![ValidationError::InvalidPattern {
                            path: entry.path.clone(),
                            source,
                        }])
                    })?;
                    RouteDescriptor::new(pattern, name.as_str(), entry.requires_auth.into())
                }
                // Unreachable for validated configs.
                _ => continue,
            };
            routes.push(descriptor);
        }

        let table = Self::index(routes);
        tracing::info!(
            routes = table.routes.len(),
            fallback = %table.fallback().redirect().map(RouteName::as_str).unwrap_or_default(),
            "Route table compiled"
        );
        Ok(table)
    }

    fn index(routes: Vec<RouteDescriptor>) -> Self {
        let mut exact = HashMap::new();
        let mut by_name = HashMap::new();
        let mut fallback = 0;

        for (i, route) in routes.iter().enumerate() {
            by_name.insert(route.name.clone(), i);
            if route.is_fallback() {
                fallback = i;
            } else if route.pattern.is_literal() {
                exact.insert(NavPath::parse(route.pattern.as_str()).as_str().to_string(), i);
            }
        }

        Self {
            routes,
            exact,
            by_name,
            fallback,
        }
    }

    /// Resolve a requested path. Never fails: unmatched paths get the fallback.
    pub fn resolve(&self, path: &str) -> &RouteDescriptor {
        self.resolve_match(path).descriptor
    }

    /// Resolve a requested path and return captured parameters.
    pub fn resolve_match(&self, path: &str) -> RouteMatch<'_> {
        let path = NavPath::parse(path);

        if let Some(&i) = self.exact.get(path.as_str()) {
            return RouteMatch {
                descriptor: &self.routes[i],
                params: Params::new(),
            };
        }

        let mut best: Option<(usize, Params, Specificity)> = None;
        for (i, route) in self.routes.iter().enumerate() {
            if let Some((params, spec)) = route.pattern.matches(&path) {
                // Strictly greater: ties keep the earlier entry.
                if best.as_ref().map_or(true, |(_, _, b)| spec > *b) {
                    best = Some((i, params, spec));
                }
            }
        }

        match best {
            Some((i, params, _)) => RouteMatch {
                descriptor: &self.routes[i],
                params,
            },
            None => RouteMatch {
                descriptor: self.fallback(),
                params: Params::new(),
            },
        }
    }

    /// The catch-all descriptor.
    pub fn fallback(&self) -> &RouteDescriptor {
        &self.routes[self.fallback]
    }

    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.by_name
            .get(&RouteName::new(name))
            .map(|&i| &self.routes[i])
    }

    /// Navigable path of a route, for turning redirect decisions into URLs.
    pub fn path_of(&self, name: &RouteName) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&i| self.routes[i].pattern.as_str())
    }

    /// True if `descriptor` is one of this table's descriptors.
    pub fn contains(&self, descriptor: &RouteDescriptor) -> bool {
        self.by_name
            .get(&descriptor.name)
            .is_some_and(|&i| &self.routes[i] == descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
