//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Every section is optional; an empty file is a valid scenario with no routes
//! - Unknown log formats fail at parse time, cross-field rules (unique route
//!   names, one action per step) in validation
//! - Route patterns are never rejected: any text compiles, `""` matches everything

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, LoggingConfig, RouteConfig, RouterConfig, Step, StepConfig};
pub use validation::ValidationError;
