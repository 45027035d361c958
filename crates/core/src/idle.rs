//! Per-connection inactivity timer.

use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep, Instant, Sleep};

/// One resettable, cancellable timer owned by a connection's lifecycle
/// task.
///
/// The timer is polled from the same `select!` loop that observes
/// inbound client frames, with the inbound branch polled first. A
/// `reset()` that lands before the expiry branch is polled always moves
/// the deadline, so a connection is never closed by a timeout whose
/// corresponding reset had already been observed.
pub struct IdleTimer {
    window: Duration,
    sleep: Pin<Box<Sleep>>,
    cancelled: bool,
}

impl IdleTimer {
    /// Start a timer with the given inactivity window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            sleep: Box::pin(sleep(window)),
            cancelled: false,
        }
    }

    /// The configured inactivity window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Cancel any pending expiry and restart the full window.
    ///
    /// No-op after `cancel()`.
    pub fn reset(&mut self) {
        if self.cancelled {
            return;
        }
        self.sleep.as_mut().reset(Instant::now() + self.window);
    }

    /// Stop the timer permanently. Used on close; `expired()` never
    /// resolves afterwards.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Resolves when the window elapses with no intervening `reset()`.
    pub async fn expired(&mut self) {
        if self.cancelled {
            future::pending::<()>().await;
        }
        self.sleep.as_mut().await;
    }
}
