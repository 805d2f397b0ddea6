//! Guard decisions.

use std::fmt;

use serde::Serialize;

use crate::routing::RouteName;

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum Decision {
    /// Navigation proceeds to the requested destination.
    Allow,
    /// Navigation is diverted to another route.
    RedirectTo(RouteName),
}

impl Decision {
    pub fn redirect(target: impl Into<RouteName>) -> Self {
        Decision::RedirectTo(target.into())
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Metric label for this decision.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::RedirectTo(_) => "redirect",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => f.write_str("allow"),
            Decision::RedirectTo(target) => write!(f, "redirect to {target}"),
        }
    }
}
