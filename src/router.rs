//! Router facade.
//!
//! # Responsibilities
//! - Attach to the platform's change notifications (once)
//! - Normalize observed locations, redirecting malformed ones
//! - Commit the current location and dispatch it to the route table
//! - Resolve navigation templates and write them to the platform
//!
//! # Design Decisions
//! - A redirect is a replace, not a dispatch; the follow-up notification
//!   dispatches the corrected location
//! - Silent navigation commits the location but skips exactly one dispatch
//! - Notifications are consumed either synchronously (`process_pending`)
//!   or by an async loop (`run`); never both at once

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};

use crate::location::platform::{LocationChange, Platform};
use crate::location::reconcile::{reconcile, reconcile_with_current};
use crate::observability::metrics;
use crate::routing::{Handler, RouteEntry, RouteTable};
use crate::sync::lock;

/// What a location change notification resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The observed location was malformed and has been replaced.
    Redirected { to: String },
    /// The location was committed without dispatching.
    Suppressed,
    /// The location was committed and dispatched.
    Dispatched { active: usize },
}

#[derive(Debug, Default)]
struct FacadeState {
    current_location: String,
    current_segments: Vec<String>,
    suppress_count: usize,
}

/// Hash-fragment router.
pub struct Router {
    platform: Arc<dyn Platform>,
    routes: RouteTable,
    state: Mutex<FacadeState>,
    attached: AtomicBool,
    listener: Mutex<Option<mpsc::UnboundedReceiver<LocationChange>>>,
}

impl Router {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            routes: RouteTable::new(),
            state: Mutex::new(FacadeState::default()),
            attached: AtomicBool::new(false),
            listener: Mutex::new(None),
        }
    }

    /// Subscribe to platform notifications. Calling it again is a no-op.
    pub fn init(&self) {
        if self.attached.swap(true, Ordering::SeqCst) {
            return;
        }
        *lock(&self.listener) = Some(self.platform.subscribe());
        tracing::info!(location = %self.platform.hash(), "Router attached");
    }

    /// Release the platform listener. Pending and later notifications are
    /// dropped; `init` may attach again.
    pub fn detach(&self) {
        if !self.attached.swap(false, Ordering::SeqCst) {
            return;
        }
        lock(&self.listener).take();
        tracing::info!("Router detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// The last committed location.
    pub fn current_location(&self) -> String {
        lock(&self.state).current_location.clone()
    }

    /// The current location split on `/`.
    pub fn current_segments(&self) -> Vec<String> {
        lock(&self.state).current_segments.clone()
    }

    /// Notifications still to be committed without dispatch.
    pub fn suppress_count(&self) -> usize {
        lock(&self.state).suppress_count
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn add_route(
        &self,
        pattern: &str,
        on_match: Handler,
        on_unmatch: Option<Handler>,
    ) -> Arc<RouteEntry> {
        self.routes.add_route(pattern, on_match, on_unmatch)
    }

    pub fn add_routes<I, S>(&self, mapping: I)
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: AsRef<str>,
    {
        self.routes.add_routes(mapping)
    }

    pub fn remove_route(
        &self,
        pattern: &str,
        on_match: &Handler,
        on_unmatch: Option<&Handler>,
    ) -> bool {
        self.routes.remove_route(pattern, on_match, on_unmatch)
    }

    pub fn remove_routes<'a, I, S>(&self, mapping: I)
    where
        I: IntoIterator<Item = (S, &'a Handler)>,
        S: AsRef<str>,
    {
        self.routes.remove_routes(mapping)
    }

    /// React to the platform location having changed.
    pub fn on_location_changed(&self) -> Outcome {
        let raw = self.platform.hash();
        let reconciled = reconcile(&raw, &raw);
        if reconciled != raw {
            tracing::info!(%raw, %reconciled, "Redirecting malformed location");
            metrics::record_redirect();
            self.platform.replace_hash(&reconciled);
            return Outcome::Redirected { to: reconciled };
        }

        let suppressed = {
            let mut state = lock(&self.state);
            state.current_segments = raw.split('/').map(str::to_string).collect();
            state.current_location = raw.clone();
            if state.suppress_count > 0 {
                state.suppress_count -= 1;
                true
            } else {
                false
            }
        };

        if suppressed {
            tracing::debug!(location = %raw, "Location committed silently");
            metrics::record_suppressed();
            return Outcome::Suppressed;
        }

        let active = self.routes.dispatch_all(&raw);
        Outcome::Dispatched { active }
    }

    /// Navigate to `template`, resolved against the current location.
    ///
    /// With `silent`, the resulting notification commits the location
    /// without dispatching. Returns the target, or `None` if it equals the
    /// current location.
    pub fn set_route(&self, template: &str, silent: bool) -> Option<String> {
        let target = {
            let mut state = lock(&self.state);
            let target = reconcile_with_current(template, &state.current_location);
            if target == state.current_location {
                return None;
            }
            if silent {
                state.suppress_count += 1;
            }
            target
        };

        tracing::info!(%template, %target, silent, "Navigating");
        metrics::record_navigation(silent);
        self.platform.set_hash(&target);
        Some(target)
    }

    /// Re-evaluate routes against the platform location without navigating.
    pub fn refresh(&self) -> Outcome {
        self.on_location_changed()
    }

    /// Handle every queued notification, including ones raised while
    /// handling. Returns the number handled.
    pub fn process_pending(&self) -> usize {
        let Some(mut rx) = lock(&self.listener).take() else {
            return 0;
        };

        let mut processed = 0;
        while self.is_attached() {
            let Ok(change) = rx.try_recv() else {
                break;
            };
            tracing::trace!(old = %change.old, new = %change.new, "Location change");
            self.on_location_changed();
            processed += 1;
        }

        self.restore_listener(rx);
        processed
    }

    /// Handle notifications as they arrive until `shutdown` fires, the
    /// router is detached, or the platform closes the channel.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        let Some(mut rx) = lock(&self.listener).take() else {
            tracing::warn!("Router loop started without an attached listener");
            return;
        };

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Router loop shutting down");
                    break;
                }
                change = rx.recv() => {
                    let Some(change) = change else {
                        break;
                    };
                    if !self.is_attached() {
                        break;
                    }
                    tracing::trace!(old = %change.old, new = %change.new, "Location change");
                    self.on_location_changed();
                }
            }
        }

        self.restore_listener(rx);
    }

    fn restore_listener(&self, rx: mpsc::UnboundedReceiver<LocationChange>) {
        if !self.is_attached() {
            return;
        }
        let mut slot = lock(&self.listener);
        if slot.is_none() {
            *slot = Some(rx);
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("state", &self.state)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}
