//! Metrics collection.
//!
//! # Metrics
//! - `route_gate_decisions_total` (counter): guard decisions by outcome and deciding rule
//! - `route_gate_session_cleared_total` (counter): public-route session cleanups
//! - `route_gate_fallback_total` (counter): navigations that hit the catch-all
//! - `route_gate_redirect_loops_total` (counter): navigations aborted as loops
//! - `route_gate_unknown_targets_total` (counter): rule redirects to routes outside the table
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations in the recorder)
//! - Labels are static strings only

use metrics::counter;

pub fn record_decision(decision: &'static str, rule: &'static str) {
    counter!("route_gate_decisions_total", "decision" => decision, "rule" => rule).increment(1);
}

pub fn record_session_cleared() {
    counter!("route_gate_session_cleared_total").increment(1);
}

pub fn record_fallback() {
    counter!("route_gate_fallback_total").increment(1);
}

pub fn record_redirect_loop() {
    counter!("route_gate_redirect_loops_total").increment(1);
}

pub fn record_unknown_target() {
    counter!("route_gate_unknown_targets_total").increment(1);
}
