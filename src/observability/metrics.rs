//! Router metrics.
//!
//! # Metrics
//! - `hashroute_dispatch_total` (counter): route evaluations by outcome
//! - `hashroute_redirects_total` (counter): malformed locations replaced
//! - `hashroute_suppressed_total` (counter): notifications committed silently
//! - `hashroute_navigations_total` (counter): `set_route` writes by silent flag
//! - `hashroute_routes` (gauge): registered routes
//!
//! # Design Decisions
//! - Uses the `metrics` facade; without an installed recorder every call is a no-op

use metrics::{counter, gauge};

pub fn record_dispatch(matched: bool) {
    let outcome = if matched { "matched" } else { "unmatched" };
    counter!("hashroute_dispatch_total", "outcome" => outcome).increment(1);
}

pub fn record_redirect() {
    counter!("hashroute_redirects_total").increment(1);
}

pub fn record_suppressed() {
    counter!("hashroute_suppressed_total").increment(1);
}

pub fn record_navigation(silent: bool) {
    let silent = if silent { "true" } else { "false" };
    counter!("hashroute_navigations_total", "silent" => silent).increment(1);
}

pub fn record_route_count(count: usize) {
    gauge!("hashroute_routes").set(count as f64);
}
