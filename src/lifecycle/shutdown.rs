//! Shutdown coordination for the service.

use tokio::sync::watch;

/// Owner side of the shutdown flag.
///
/// The flag latches: a [`ShutdownSignal`] taken after [`Shutdown::trigger`]
/// still resolves. Dropping the coordinator counts as a trigger.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Listener side handed to the HTTP server and tests.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Idempotent.
    pub fn trigger(&self) {
        self.tx.send_if_modified(|fired| !std::mem::replace(fired, true));
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown has been triggered or the coordinator is gone.
    pub async fn recv(mut self) {
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}
