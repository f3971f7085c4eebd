//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store routes keyed by pattern, one entry per distinct pattern
//! - Keep a dispatch order sorted by compiled pattern length
//! - Dispatch a location to every route
//!
//! # Design Decisions
//! - Every route is evaluated on every dispatch; no first-match-wins
//! - Ties in compiled length keep insertion order via an explicit sequence
//!   number, independent of sort stability
//! - Routes are never removed, even once they have no handlers left
//! - Dispatch iterates a snapshot so handlers may register routes mid-pass

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::observability::metrics;
use crate::routing::entry::RouteEntry;
use crate::routing::observer::{Channel, Handler};
use crate::sync::lock;

#[derive(Debug, Default)]
struct TableInner {
    entries: HashMap<String, Arc<RouteEntry>>,
    order: Vec<String>,
    next_seq: u64,
}

impl TableInner {
    fn get_or_create(&mut self, pattern: &str) -> (Arc<RouteEntry>, bool) {
        if let Some(entry) = self.entries.get(pattern) {
            return (entry.clone(), false);
        }
        let entry = Arc::new(RouteEntry::new(pattern, self.next_seq));
        self.next_seq += 1;
        self.entries.insert(pattern.to_string(), entry.clone());
        self.order.push(pattern.to_string());
        tracing::info!(pattern, compiled = %entry.pattern(), "Route registered");
        (entry, true)
    }

    fn sort(&mut self) {
        let entries = &self.entries;
        self.order.sort_by_key(|pattern| {
            let entry = &entries[pattern];
            (entry.pattern().compiled_len(), entry.seq())
        });
        metrics::record_route_count(self.order.len());
    }
}

/// Ordered collection of routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    inner: Mutex<TableInner>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `on_match` (and optionally `on_unmatch`) for `pattern`,
    /// creating the route on first use.
    pub fn add_route(
        &self,
        pattern: &str,
        on_match: Handler,
        on_unmatch: Option<Handler>,
    ) -> Arc<RouteEntry> {
        let entry = {
            let mut inner = lock(&self.inner);
            let (entry, created) = inner.get_or_create(pattern);
            if created {
                inner.sort();
            }
            entry
        };

        entry.add_handler(Channel::Routed, on_match);
        if let Some(handler) = on_unmatch {
            entry.add_handler(Channel::Unrouted, handler);
        }
        entry
    }

    /// Register a `routed` handler for each pattern, sorting once at the end.
    pub fn add_routes<I, S>(&self, mapping: I)
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: AsRef<str>,
    {
        let mut inner = lock(&self.inner);
        for (pattern, handler) in mapping {
            let (entry, _) = inner.get_or_create(pattern.as_ref());
            entry.add_handler(Channel::Routed, handler);
        }
        inner.sort();
    }

    /// Unregister handlers from `pattern`. The route itself stays in the table.
    /// Returns true if any handler was removed.
    pub fn remove_route(
        &self,
        pattern: &str,
        on_match: &Handler,
        on_unmatch: Option<&Handler>,
    ) -> bool {
        let Some(entry) = self.get(pattern) else {
            return false;
        };
        let mut removed = entry.remove_handler(Channel::Routed, on_match);
        if let Some(handler) = on_unmatch {
            removed |= entry.remove_handler(Channel::Unrouted, handler);
        }
        removed
    }

    /// Unregister a `routed` handler from each pattern.
    pub fn remove_routes<'a, I, S>(&self, mapping: I)
    where
        I: IntoIterator<Item = (S, &'a Handler)>,
        S: AsRef<str>,
    {
        for (pattern, handler) in mapping {
            self.remove_route(pattern.as_ref(), handler, None);
        }
    }

    pub fn get(&self, pattern: &str) -> Option<Arc<RouteEntry>> {
        lock(&self.inner).entries.get(pattern).cloned()
    }

    /// Patterns in dispatch order.
    pub fn order(&self) -> Vec<String> {
        lock(&self.inner).order.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch `location` to every route in order.
    /// Returns the number of routes that are active afterwards.
    pub fn dispatch_all(&self, location: &str) -> usize {
        let snapshot: Vec<Arc<RouteEntry>> = {
            let inner = lock(&self.inner);
            inner
                .order
                .iter()
                .map(|pattern| inner.entries[pattern].clone())
                .collect()
        };

        let active = snapshot
            .iter()
            .filter(|entry| entry.dispatch(location))
            .count();
        tracing::debug!(%location, routes = snapshot.len(), active, "Dispatched location");
        active
    }
}
