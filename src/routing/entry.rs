//! A single registered route and its dispatch state.
//!
//! # Responsibilities
//! - Own the compiled pattern and the handler registry
//! - Evaluate the pattern against a location and emit `routed`/`unrouted`
//! - Track `active`, `changed` and the last capture signature
//!
//! # Design Decisions
//! - Handlers run with no lock held, so they may read the route, register
//!   more handlers, or touch the route table
//! - `changed` is computed before `routed` handlers run; `active` and the
//!   signature are committed after them

use std::sync::Mutex;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::observability::metrics;
use crate::routing::observer::{Channel, Handler, Observers};
use crate::routing::pattern::Pattern;
use crate::sync::lock;

/// Joins captured values into a signature. Cannot occur in a fragment.
const SIGNATURE_SEPARATOR: &str = "\u{0}";

/// Captured parameters in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Value of the named parameter. A name repeated in the pattern yields
    /// its rightmost capture.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Arguments passed to route handlers.
#[derive(Debug)]
pub struct RouteEvent<'a> {
    pub route: &'a RouteEntry,
    pub channel: Channel,
    /// Empty for `unrouted`.
    pub params: Params,
}

#[derive(Debug, Default)]
struct DispatchState {
    active: bool,
    changed: bool,
    last_signature: Option<String>,
}

/// A compiled pattern plus its handlers and dispatch state.
#[derive(Debug)]
pub struct RouteEntry {
    pattern: Pattern,
    seq: u64,
    observers: Mutex<Observers>,
    state: Mutex<DispatchState>,
}

impl RouteEntry {
    /// Create a route. `seq` is the table's insertion sequence number.
    pub(crate) fn new(pattern: &str, seq: u64) -> Self {
        Self {
            pattern: Pattern::compile(pattern),
            seq,
            observers: Mutex::new(Observers::new()),
            state: Mutex::new(DispatchState::default()),
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    /// True iff the last dispatch matched.
    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }

    /// True iff the latest match captured different values than the one before.
    pub fn is_changed(&self) -> bool {
        lock(&self.state).changed
    }

    pub fn last_signature(&self) -> Option<String> {
        lock(&self.state).last_signature.clone()
    }

    pub fn add_handler(&self, channel: Channel, handler: Handler) {
        lock(&self.observers).add(channel, handler);
    }

    pub fn remove_handler(&self, channel: Channel, handler: &Handler) -> bool {
        lock(&self.observers).remove(channel, handler) > 0
    }

    pub fn handler_count(&self, channel: Channel) -> usize {
        lock(&self.observers).len(channel)
    }

    /// Evaluate the route against `location`. Returns the new `active` value.
    pub fn dispatch(&self, location: &str) -> bool {
        let Some(values) = self.pattern.captures(location) else {
            let was_active = {
                let mut state = lock(&self.state);
                state.last_signature = None;
                state.active
            };
            if was_active {
                tracing::debug!(pattern = %self.pattern.source(), %location, "Route deactivated");
                self.emit(Channel::Unrouted, Params::default());
            }
            lock(&self.state).active = false;
            metrics::record_dispatch(false);
            return false;
        };

        let signature = values.join(SIGNATURE_SEPARATOR);
        let changed = {
            let mut state = lock(&self.state);
            state.changed = state.last_signature.as_deref() != Some(signature.as_str());
            state.changed
        };

        tracing::debug!(pattern = %self.pattern.source(), %location, changed, "Route matched");

        let params = self
            .pattern
            .param_names()
            .iter()
            .cloned()
            .zip(values)
            .collect();
        self.emit(Channel::Routed, params);

        {
            let mut state = lock(&self.state);
            state.last_signature = Some(signature);
            state.active = true;
        }
        metrics::record_dispatch(true);
        true
    }

    fn emit(&self, channel: Channel, params: Params) {
        let handlers = lock(&self.observers).snapshot(channel);
        if handlers.is_empty() {
            return;
        }
        let event = RouteEvent {
            route: self,
            channel,
            params,
        };
        for handler in &handlers {
            handler.call(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder(log: &Arc<Mutex<Vec<String>>>) -> Handler {
        let log = log.clone();
        Handler::new(move |event| {
            let params: Vec<String> = event.params.iter().map(|(n, v)| format!("{n}={v}")).collect();
            log.lock().unwrap().push(format!(
                "{}:{}:{}",
                event.channel,
                params.join(","),
                event.route.is_changed()
            ));
        })
    }

    #[test]
    fn test_literal_route_matches_prefix() {
        let entry = RouteEntry::new("/settings", 0);
        assert!(entry.dispatch("/settings/profile"));
        assert!(entry.is_active());
        assert!(!entry.dispatch("/home"));
        assert!(!entry.is_active());
    }

    #[test]
    fn test_routed_event_carries_params_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let entry = RouteEntry::new("/:b/:a", 0);
        entry.add_handler(Channel::Routed, recorder(&log));

        entry.dispatch("/one/two");
        assert_eq!(*log.lock().unwrap(), ["routed:b=one,a=two:true"]);
    }

    #[test]
    fn test_changed_tracks_signature() {
        let entry = RouteEntry::new("users/:id", 0);

        entry.dispatch("users/1");
        assert!(entry.is_changed());

        entry.dispatch("users/1");
        assert!(!entry.is_changed());

        entry.dispatch("users/2");
        assert!(entry.is_changed());
    }

    #[test]
    fn test_unmatch_clears_signature_and_emits_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let entry = RouteEntry::new("users/:id", 0);
        entry.add_handler(Channel::Unrouted, recorder(&log));

        entry.dispatch("other");
        assert!(log.lock().unwrap().is_empty());

        entry.dispatch("users/1");
        assert_eq!(entry.last_signature().as_deref(), Some("1"));

        entry.dispatch("other");
        entry.dispatch("other");
        assert_eq!(log.lock().unwrap().len(), 1);
        assert!(entry.last_signature().is_none());

        entry.dispatch("users/1");
        assert!(entry.is_changed());
    }

    #[test]
    fn test_handler_sees_previous_active_state() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let entry = RouteEntry::new("a", 0);
        let s = seen.clone();
        entry.add_handler(
            Channel::Routed,
            Handler::new(move |event| s.lock().unwrap().push(event.route.is_active())),
        );

        entry.dispatch("a");
        entry.dispatch("a");
        assert_eq!(*seen.lock().unwrap(), [false, true]);
    }

    #[test]
    fn test_removed_handler_is_not_called() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let entry = RouteEntry::new("a", 0);
        let handler = recorder(&log);
        entry.add_handler(Channel::Routed, handler.clone());
        assert!(entry.remove_handler(Channel::Routed, &handler));
        assert!(!entry.remove_handler(Channel::Routed, &handler));

        assert!(entry.dispatch("a"));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_params_serialize_in_pattern_order() {
        let params: Params = vec![
            ("z".to_string(), "1".to_string()),
            ("a".to_string(), "2".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
