//! Process-wide stop signal.
//!
//! The HTTP server drains its connections and the route reload worker leaves
//! its poll loop when the signal fires. Either side may fire it: the signal
//! handler on SIGINT/SIGTERM, or startup when the server exits on its own.

use tokio::sync::broadcast;

/// Cloneable handle onto the stop signal.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once [`trigger`](Self::trigger) is called.
    ///
    /// Subscribe before spawning the task that waits on it; a receiver
    /// created after the signal fired never sees it.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Firing twice, or with nobody listening, is harmless.
    pub fn trigger(&self) {
        let listeners = self.tx.send(()).unwrap_or(0);
        tracing::debug!(listeners, "Shutdown signal sent");
    }

    /// Tasks currently waiting on the signal.
    pub fn listeners(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn server_and_worker_receivers_both_fire() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut worker = shutdown.clone().subscribe();
        assert_eq!(shutdown.listeners(), 2);

        shutdown.trigger();

        assert!(server.recv().await.is_ok());
        assert!(worker.recv().await.is_ok());
    }

    #[test]
    fn trigger_without_listeners_is_harmless() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();
        assert_eq!(shutdown.listeners(), 0);
    }
}
