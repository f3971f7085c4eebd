//! Scenario runner.
//!
//! Drives a [`Router`] over an in-memory platform from a [`RouterConfig`]:
//! registers every configured route with recording handlers, executes the
//! navigation steps, and returns what happened as a trace.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::config::schema::{RouterConfig, Step};
use crate::location::platform::{MemoryLocation, Platform};
use crate::routing::{Channel, Handler, Params};
use crate::router::{Outcome, Router};
use crate::sync::lock;

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Routed {
        route: String,
        params: Params,
        changed: bool,
    },
    Unrouted {
        route: String,
    },
    /// Emitted after each step once notifications have settled.
    Location {
        step: usize,
        location: String,
        segments: Vec<String>,
    },
}

fn recorder(trace: &Arc<Mutex<Vec<TraceEvent>>>, name: &str) -> Handler {
    let trace = trace.clone();
    let name = name.to_string();
    Handler::new(move |event| {
        let recorded = match event.channel {
            Channel::Routed => TraceEvent::Routed {
                route: name.clone(),
                params: event.params.clone(),
                changed: event.route.is_changed(),
            },
            Channel::Unrouted => TraceEvent::Unrouted {
                route: name.clone(),
            },
        };
        lock(&trace).push(recorded);
    })
}

/// Run the configured scenario and return its trace.
///
/// The initial location is evaluated once after attaching, the way a page
/// load sees its starting fragment.
pub fn run_scenario(config: &RouterConfig) -> Vec<TraceEvent> {
    let platform = Arc::new(MemoryLocation::new(&config.router.initial_location));
    let router = Router::new(platform.clone());
    let trace = Arc::new(Mutex::new(Vec::new()));

    for route in &config.routes {
        router.add_route(
            &route.pattern,
            recorder(&trace, &route.name),
            Some(recorder(&trace, &route.name)),
        );
    }

    router.init();
    settle(&router, router.refresh());

    for (index, step) in config.steps.iter().enumerate() {
        match step.action() {
            Some(Step::Navigate { template, silent }) => {
                router.set_route(&template, silent);
            }
            Some(Step::Hash(hash)) => platform.set_hash(&hash),
            Some(Step::Refresh) => settle(&router, router.refresh()),
            None => {
                tracing::warn!(step = index, "Skipping step without a single action");
                continue;
            }
        }
        router.process_pending();

        lock(&trace).push(TraceEvent::Location {
            step: index,
            location: router.current_location(),
            segments: router.current_segments(),
        });
    }

    router.detach();
    let events = lock(&trace).clone();
    events
}

fn settle(router: &Router, outcome: Outcome) {
    tracing::debug!(?outcome, "Refreshed");
    router.process_pending();
}
