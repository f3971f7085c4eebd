//! Hash-fragment router.
//!
//! Maps a navigation location to registered route handlers, tracks which
//! routes are active, and resolves relative, wildcarded navigation requests
//! into absolute locations.

pub mod config;
pub mod lifecycle;
pub mod location;
pub mod observability;
pub mod router;
pub mod routing;
pub mod scenario;

mod sync;

pub use config::RouterConfig;
pub use lifecycle::Shutdown;
pub use location::{reconcile, MemoryLocation, Platform};
pub use router::{Outcome, Router};
pub use routing::{Channel, Handler, Params, RouteEntry, RouteEvent, RouteTable};
