//! Configuration schema definitions.
//!
//! A config file declares logging, the initial location, a set of named
//! routes, and a navigation script used by the scenario runner.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Router settings.
    pub router: RouterSettings,

    /// Route declarations.
    pub routes: Vec<RouteConfig>,

    /// Navigation steps, executed in order.
    pub steps: Vec<StepConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (e.g., "hashroute=debug").
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "hashroute=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterSettings {
    /// Fragment the platform starts at, without `#`.
    pub initial_location: String,
}

/// A named route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Identifier used in traces.
    pub name: String,

    /// Route pattern (`literal`, `:param`, `##`).
    pub pattern: String,
}

/// One navigation step. Exactly one action must be set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StepConfig {
    /// Navigate to a location template.
    pub navigate: Option<String>,

    /// With `navigate`: commit without dispatching.
    pub silent: bool,

    /// Write a raw fragment to the platform, bypassing reconciliation.
    pub hash: Option<String>,

    /// Re-evaluate routes against the current location.
    pub refresh: bool,
}

/// A validated step action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Navigate { template: String, silent: bool },
    Hash(String),
    Refresh,
}

impl StepConfig {
    /// Number of actions set on this step.
    pub fn action_count(&self) -> usize {
        usize::from(self.navigate.is_some())
            + usize::from(self.hash.is_some())
            + usize::from(self.refresh)
    }

    /// The step's action, if exactly one is set.
    pub fn action(&self) -> Option<Step> {
        if self.action_count() != 1 {
            return None;
        }
        if let Some(template) = &self.navigate {
            return Some(Step::Navigate {
                template: template.clone(),
                silent: self.silent,
            });
        }
        if let Some(hash) = &self.hash {
            return Some(Step::Hash(hash.clone()));
        }
        Some(Step::Refresh)
    }
}
