//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Requested path (may carry ?query / #fragment)
//!     → pattern.rs (normalize to NavPath)
//!     → table.rs (exact lookup, then most specific pattern)
//!     → Return: matched RouteDescriptor, or the fallback
//!
//! Route Compilation (at startup):
//!     RouteTableConfig
//!     → Validate
//!     → Parse patterns, index literal paths and names
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (literal / param / tail-wildcard segments only)
//! - Deterministic: same input always matches same route
//! - Most specific match wins; ties go to the earlier entry

pub mod pattern;
pub mod table;

pub use pattern::{NavPath, Params, PathPattern, PatternError};
pub use table::{Access, RouteDescriptor, RouteMatch, RouteName, RouteTable};
