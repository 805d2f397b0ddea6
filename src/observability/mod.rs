//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Config loading, table compilation, guard decisions:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log output (stderr, pretty or JSON)
//!     → Whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`; the host decides whether to install a subscriber
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops

pub mod logging;
pub mod metrics;
