//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route names unique and non-empty
//! - Every step names exactly one action
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: RouterConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logging.level must not be empty")]
    EmptyLogLevel,

    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route name '{name}' is declared more than once")]
    DuplicateRouteName { name: String },

    #[error("step #{index} sets {count} actions, expected exactly one")]
    StepActionCount { index: usize, count: usize },

    #[error("step #{index} sets silent without navigate")]
    SilentWithoutNavigate { index: usize },
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.logging.level.trim().is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName {
                name: route.name.clone(),
            });
        }
    }

    for (index, step) in config.steps.iter().enumerate() {
        let count = step.action_count();
        if count != 1 {
            errors.push(ValidationError::StepActionCount { index, count });
        }
        if step.silent && step.navigate.is_none() {
            errors.push(ValidationError::SilentWithoutNavigate { index });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RouteConfig, StepConfig};

    fn route(name: &str, pattern: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_pattern_is_valid() {
        let mut config = RouterConfig::default();
        config.routes.push(route("any", ""));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.routes.push(route("a", "x"));
        config.routes.push(route("a", ""));
        config.steps.push(StepConfig::default());
        config.steps.push(StepConfig {
            hash: Some("x".into()),
            silent: true,
            ..Default::default()
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateRouteName { name: "a".into() },
                ValidationError::StepActionCount { index: 0, count: 0 },
                ValidationError::SilentWithoutNavigate { index: 1 },
            ]
        );
    }
}
