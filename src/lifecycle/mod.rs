//! Router lifecycle.
//!
//! # Data Flow
//! ```text
//! Router::new → init (attach listener)
//!     → run loop / process_pending
//!     → Shutdown::stop or detach (release listener)
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
