//! Navigation platform boundary.
//!
//! # Responsibilities
//! - Read the current location fragment
//! - Push or replace the location
//! - Notify subscribers when the fragment changes
//!
//! # Design Decisions
//! - Fragments are stored without the leading `#`
//! - Writing the current value again raises no notification
//! - Notifications are queued on a channel, never delivered re-entrantly

use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::sync::lock;

/// A location change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    pub old: String,
    pub new: String,
}

/// Navigation primitives the router is built on.
pub trait Platform: Send + Sync {
    /// Current fragment, without the leading `#`.
    fn hash(&self) -> String;

    /// Navigate to `hash`, adding a history entry.
    fn set_hash(&self, hash: &str);

    /// Navigate to `hash`, replacing the current history entry.
    fn replace_hash(&self, hash: &str);

    /// Subscribe to change notifications.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<LocationChange>;
}

#[derive(Debug, Default)]
struct MemoryState {
    history: Vec<String>,
    listeners: Vec<mpsc::UnboundedSender<LocationChange>>,
}

/// In-process platform holding the fragment and a history list.
#[derive(Debug)]
pub struct MemoryLocation {
    state: Mutex<MemoryState>,
}

impl MemoryLocation {
    pub fn new(initial: &str) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                history: vec![strip_hash(initial).to_string()],
                listeners: Vec::new(),
            }),
        }
    }

    /// Every fragment visited, oldest first.
    pub fn history(&self) -> Vec<String> {
        lock(&self.state).history.clone()
    }

    fn write(&self, hash: &str, replace: bool) {
        let new = strip_hash(hash).to_string();
        let mut state = lock(&self.state);
        let old = state.history.last().cloned().unwrap_or_default();
        if old == new {
            return;
        }

        if replace {
            state.history.pop();
        }
        state.history.push(new.clone());

        let change = LocationChange { old, new };
        state
            .listeners
            .retain(|listener| listener.send(change.clone()).is_ok());
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl Platform for MemoryLocation {
    fn hash(&self) -> String {
        lock(&self.state).history.last().cloned().unwrap_or_default()
    }

    fn set_hash(&self, hash: &str) {
        self.write(hash, false);
    }

    fn replace_hash(&self, hash: &str) {
        self.write(hash, true);
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<LocationChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.state).listeners.push(tx);
        rx
    }
}

fn strip_hash(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}
