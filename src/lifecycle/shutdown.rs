//! Stop signal for router notification loops.

use tokio::sync::broadcast;

/// Broadcast stop signal for [`Router::run`](crate::Router::run).
///
/// Take a receiver with [`Shutdown::listen`] before spawning each loop; a
/// single [`Shutdown::stop`] ends all of them.
#[derive(Debug, Clone)]
pub struct Shutdown {
    stop_tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stop_tx, _) = broadcast::channel(1);
        Self { stop_tx }
    }

    pub fn listen(&self) -> broadcast::Receiver<()> {
        self.stop_tx.subscribe()
    }

    /// Signal every listening loop. Returns how many were reached.
    pub fn stop(&self) -> usize {
        self.stop_tx.send(()).unwrap_or(0)
    }

    /// Loops that have not yet returned.
    pub fn running_loops(&self) -> usize {
        self.stop_tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
