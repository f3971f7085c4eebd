//! Shared utilities for router integration tests.

use std::sync::{Arc, Mutex};

use hashroute::{Channel, Handler, MemoryLocation, Router};

/// Collects a line per handler call: `<name>:<channel>[:k=v,...]`.
#[derive(Clone, Default)]
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self, name: &str) -> Handler {
        let lines = self.lines.clone();
        let name = name.to_string();
        Handler::new(move |event| {
            let mut line = format!("{}:{}", name, event.channel);
            if event.channel == Channel::Routed && !event.params.is_empty() {
                let params: Vec<String> =
                    event.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
                line.push(':');
                line.push_str(&params.join(","));
            }
            lines.lock().unwrap().push(line);
        })
    }

    /// Drain recorded lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

/// A router attached to a fresh in-memory platform.
#[allow(dead_code)]
pub fn attached_router(initial: &str) -> (Arc<MemoryLocation>, Arc<Router>) {
    let platform = Arc::new(MemoryLocation::new(initial));
    let router = Arc::new(Router::new(platform.clone()));
    router.init();
    (platform, router)
}
