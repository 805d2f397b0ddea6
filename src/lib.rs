//! Client-side route authorization gate.
//!
//! Decides, before every navigation, whether it proceeds, is redirected, or
//! logs the user out. This is a UX-layer gate: it checks only that a session
//! token is present and never validates it.
//!
//! ```text
//! routing engine ──on_before_navigate──▶ NavigationGate
//!                                          │
//!                      ┌───────────────────┼──────────────────┐
//!                      ▼                   ▼                  ▼
//!                 RouteTable       NavigationGuard       SessionStore
//!              (resolve path)    (ordered rule list)   (token/userId/patientId)
//! ```

pub mod config;
pub mod guard;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod session;

pub use config::RouteTableConfig;
pub use guard::{Decision, NavigationGuard};
pub use navigation::{NavigationGate, NavigationOutcome};
pub use routing::{RouteDescriptor, RouteTable};
pub use session::{SessionKey, SessionStore};
