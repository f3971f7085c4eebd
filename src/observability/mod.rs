//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / location / router
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`pattern`, `location`) rather than formatted messages
//! - Dispatch details at `debug`, navigation and registration at `info`

pub mod logging;
pub mod metrics;
