//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (redirect targets and guard roles name existing routes)
//! - Detect conflicting routes and a missing or duplicated fallback
//! - Reject guard setups that would redirect in a loop
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Runs before the route table is built

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::config::schema::{RouteEntry, RouteTableConfig, FALLBACK_NAME};
use crate::routing::pattern::{PathPattern, PatternError};

/// A single semantic problem in a route table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route '{path}': {source}")]
    InvalidPattern { path: String, source: PatternError },

    #[error("route '{path}' is missing a name")]
    MissingName { path: String },

    #[error("route '{path}' has a redirect; only the '*' fallback may redirect")]
    UnexpectedRedirect { path: String },

    #[error("duplicate path pattern '{0}'")]
    DuplicatePath(String),

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("route name '{0}' is reserved for the fallback")]
    ReservedName(String),

    #[error("no '*' fallback route configured")]
    MissingFallback,

    #[error("{0} '*' fallback routes configured; exactly one is allowed")]
    DuplicateFallback(usize),

    #[error("the '*' fallback has no redirect target")]
    FallbackWithoutRedirect,

    #[error("the '*' fallback may only carry a redirect")]
    FallbackMetadata,

    #[error("{role} names unknown route '{name}'")]
    UnknownRoute { role: &'static str, name: String },

    #[error("{role} route '{name}' has non-literal path '{path}'")]
    NonLiteralTarget {
        role: &'static str,
        name: String,
        path: String,
    },

    #[error("login route '{0}' requires a session")]
    LoginRequiresAuth(String),

    #[error("profile route '{0}' is public and would clear the session")]
    ProfileIsPublic(String),

    #[error("profile route '{0}' is also an entry route")]
    ProfileIsEntryRoute(String),

    #[error("navigation.max_redirects must be at least 1")]
    ZeroRedirectLimit,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut shapes = HashSet::new();
    let mut names: HashMap<&str, &RouteEntry> = HashMap::new();
    let mut fallback_count = 0;

    for entry in &config.routes {
        if entry.is_catch_all() {
            fallback_count += 1;
            if entry.redirect.is_none() {
                errors.push(ValidationError::FallbackWithoutRedirect);
            }
            if entry.name.is_some() || entry.requires_auth.is_some() {
                errors.push(ValidationError::FallbackMetadata);
            }
            continue;
        }

        match PathPattern::parse(&entry.path) {
            // Param names don't affect what a pattern matches
            Ok(pattern) => {
                if !shapes.insert(pattern.shape()) {
                    errors.push(ValidationError::DuplicatePath(entry.path.clone()));
                }
            }
            Err(source) => errors.push(ValidationError::InvalidPattern {
                path: entry.path.clone(),
                source,
            }),
        }
        if entry.redirect.is_some() {
            errors.push(ValidationError::UnexpectedRedirect {
                path: entry.path.clone(),
            });
        }

        match entry.name.as_deref() {
            None => errors.push(ValidationError::MissingName {
                path: entry.path.clone(),
            }),
            Some(FALLBACK_NAME) => errors.push(ValidationError::ReservedName(FALLBACK_NAME.to_string())),
            Some(name) => {
                if names.insert(name, entry).is_some() {
                    errors.push(ValidationError::DuplicateName(name.to_string()));
                }
            }
        }
    }

    match fallback_count {
        0 => errors.push(ValidationError::MissingFallback),
        1 => {}
        n => errors.push(ValidationError::DuplicateFallback(n)),
    }

    for target in config.fallbacks().filter_map(|f| f.redirect.as_deref()) {
        check_target("fallback", target, &names, &mut errors);
    }

    let guard = &config.guard;
    check_target("guard.login", &guard.login, &names, &mut errors);
    check_target("guard.profile", &guard.profile, &names, &mut errors);
    for name in &guard.entry_routes {
        if !names.contains_key(name.as_str()) {
            errors.push(ValidationError::UnknownRoute {
                role: "guard.entry_routes",
                name: name.clone(),
            });
        }
    }

    if let Some(login) = names.get(guard.login.as_str()) {
        if login.requires_auth == Some(true) {
            errors.push(ValidationError::LoginRequiresAuth(guard.login.clone()));
        }
    }
    if let Some(profile) = names.get(guard.profile.as_str()) {
        if profile.requires_auth == Some(false) {
            errors.push(ValidationError::ProfileIsPublic(guard.profile.clone()));
        }
    }
    if guard.entry_routes.contains(&guard.profile) {
        errors.push(ValidationError::ProfileIsEntryRoute(guard.profile.clone()));
    }

    if config.navigation.max_redirects == 0 {
        errors.push(ValidationError::ZeroRedirectLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A redirect target must exist and be reachable without parameters.
fn check_target(
    role: &'static str,
    name: &str,
    names: &HashMap<&str, &RouteEntry>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(entry) = names.get(name) else {
        errors.push(ValidationError::UnknownRoute {
            role,
            name: name.to_string(),
        });
        return;
    };

    let literal = PathPattern::parse(&entry.path)
        .map(|p| p.is_literal())
        .unwrap_or(true);
    if !literal {
        errors.push(ValidationError::NonLiteralTarget {
            role,
            name: name.to_string(),
            path: entry.path.clone(),
        });
    }
}
