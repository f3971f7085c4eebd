//! Per-route observer registry.
//!
//! # Responsibilities
//! - Hold the `routed` and `unrouted` handler lists of a route
//! - Add and remove handlers by identity
//! - Hand out snapshots so handlers can mutate the registry mid-dispatch
//!
//! # Design Decisions
//! - Identity is the handler's `Arc` allocation; clone a `Handler` to keep
//!   the ability to remove it later
//! - Handlers run in registration order

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::routing::entry::RouteEvent;

/// Event channel of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Emitted every time the route matches.
    Routed,
    /// Emitted when a previously active route stops matching.
    Unrouted,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Routed => "routed",
            Channel::Unrouted => "unrouted",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type HandlerFn = dyn Fn(&RouteEvent<'_>) + Send + Sync;

/// A route callback with identity semantics.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&RouteEvent<'_>) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, event: &RouteEvent<'_>) {
        (self.0)(event)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// Handler lists keyed by channel.
#[derive(Debug, Default)]
pub struct Observers {
    channels: HashMap<Channel, Vec<Handler>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, channel: Channel, handler: Handler) {
        self.channels.entry(channel).or_default().push(handler);
    }

    /// Remove every registration of `handler` on `channel`.
    /// Returns the number of registrations removed.
    pub fn remove(&mut self, channel: Channel, handler: &Handler) -> usize {
        let Some(list) = self.channels.get_mut(&channel) else {
            return 0;
        };
        let before = list.len();
        list.retain(|h| h != handler);
        before - list.len()
    }

    /// Copy of the handler list for `channel`, in registration order.
    pub fn snapshot(&self, channel: Channel) -> Vec<Handler> {
        self.channels.get(&channel).cloned().unwrap_or_default()
    }

    pub fn len(&self, channel: Channel) -> usize {
        self.channels.get(&channel).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.channels.values().all(Vec::is_empty)
    }
}
