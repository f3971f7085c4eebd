//! Location subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation request (template with `*` / `**`)
//!     → reconcile.rs (resolve against the current location)
//!     → platform.rs (write fragment)
//!     → LocationChange notification
//!     → router (self-reconcile, commit, dispatch)
//! ```

pub mod platform;
pub mod reconcile;

pub use platform::{LocationChange, MemoryLocation, Platform};
pub use reconcile::{reconcile, reconcile_with_current, EMPTY_CONTEXT};
