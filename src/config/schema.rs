//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the route table.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Path pattern of the catch-all fallback entry.
pub const CATCH_ALL: &str = "*";

/// Logical name given to the fallback descriptor. Reserved.
pub const FALLBACK_NAME: &str = "NotFound";

/// Root configuration for the navigation gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Ordered route entries, including exactly one catch-all fallback.
    pub routes: Vec<RouteEntry>,

    /// Which routes the guard treats as login, profile and entry routes.
    pub guard: GuardConfig,

    /// Redirect-following limits.
    pub navigation: NavigationConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl RouteTableConfig {
    /// The fallback entries of this configuration (valid configs have exactly one).
    pub fn fallbacks(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().filter(|r| r.is_catch_all())
    }
}

/// One `{path, name, requires_auth?}` entry, or the `{path: "*", redirect}` fallback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteEntry {
    /// Path pattern (`/calendar`, `/patients/:id`, `/records/*` or `*`).
    pub path: String,

    /// Logical route name. Required on every entry except the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tri-state session requirement; omitted means "no requirement".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_auth: Option<bool>,

    /// Redirect target (logical name). Only valid on the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl RouteEntry {
    /// A regular named route.
    pub fn route(path: impl Into<String>, name: impl Into<String>, requires_auth: Option<bool>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            requires_auth,
            redirect: None,
        }
    }

    /// The catch-all entry redirecting to `target`.
    pub fn fallback(target: impl Into<String>) -> Self {
        Self {
            path: CATCH_ALL.to_string(),
            name: None,
            requires_auth: None,
            redirect: Some(target.into()),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.path == CATCH_ALL
    }
}

/// Guard roles, expressed as logical route names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where unauthenticated visitors of protected routes are sent.
    pub login: String,

    /// Where authenticated visitors of entry routes are sent.
    pub profile: String,

    /// Routes intended only for visitors without a session.
    pub entry_routes: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login: "Login".to_string(),
            profile: "Profile".to_string(),
            entry_routes: vec![
                "Login".to_string(),
                "Signup".to_string(),
                "CaregiverSignup".to_string(),
            ],
        }
    }
}

/// Navigation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum redirects followed by a single navigation before it is
    /// reported as a loop.
    pub max_redirects: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { max_redirects: 8 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for RouteTableConfig {
    /// The application's canonical route table.
    fn default() -> Self {
        Self {
            routes: vec![
                RouteEntry::route("/", "Home", Some(false)),
                RouteEntry::route("/login", "Login", Some(false)),
                RouteEntry::route("/signup", "Signup", Some(false)),
                RouteEntry::route("/caregiver-signup", "CaregiverSignup", Some(false)),
                RouteEntry::route("/profile", "Profile", Some(true)),
                RouteEntry::route("/calendar", "Calendar", Some(true)),
                RouteEntry::route("/map", "Map", Some(true)),
                RouteEntry::route("/medical-records", "MedicalRecords", Some(true)),
                RouteEntry::route("/voice-chat", "VoiceChat", Some(true)),
                RouteEntry::route("/subscription", "Subscription", None),
                RouteEntry::route("/alerts", "Alerts", None),
                RouteEntry::route("/assign-device", "AssignDeviceToPatient", None),
                RouteEntry::fallback("Home"),
            ],
            guard: GuardConfig::default(),
            navigation: NavigationConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
