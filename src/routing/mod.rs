//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     add_route(pattern, handlers)
//!     → pattern.rs (tokenize, compile to literal/capture tokens)
//!     → table.rs (get-or-create entry, re-sort dispatch order)
//!
//! Dispatch:
//!     location
//!     → table.rs (snapshot order, visit every entry)
//!     → entry.rs (match, compute signature, update active/changed)
//!     → observer.rs (routed / unrouted handlers)
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once, at registration
//! - No regex (prefix + capture matching only)
//! - Deterministic: dispatch order depends only on patterns and insertion order
//! - All routes evaluated; several features may listen to overlapping routes

pub mod entry;
pub mod observer;
pub mod pattern;
pub mod table;

pub use entry::{Params, RouteEntry, RouteEvent};
pub use observer::{Channel, Handler, Observers};
pub use pattern::{Pattern, Token};
pub use table::RouteTable;
