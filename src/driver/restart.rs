//! Deferred Restart Scheduling
//!
//! A restart stops the hunt immediately and starts the next one after a short
//! pause so the renderer can tear the old scene down. At most one deferred
//! start is honoured: scheduling again aborts the pending timer, and a timer
//! that already fired is only accepted if its ticket is still current.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Identifies one scheduled restart.
pub type RestartTicket = u64;

/// Result of scheduling a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRestart {
    /// Ticket the timer will present when it fires.
    pub ticket: RestartTicket,
    /// A previously pending restart was cancelled.
    pub superseded: bool,
}

struct PendingRestart {
    ticket: RestartTicket,
    task: JoinHandle<()>,
}

/// Single-slot scheduler for deferred starts.
pub struct RestartScheduler {
    delay: Duration,
    next_ticket: RestartTicket,
    pending: Option<PendingRestart>,
}

impl RestartScheduler {
    /// Create a scheduler with a fixed delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Delay between scheduling and firing.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `fire` to run after the delay, replacing any pending restart.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&mut self, fire: F) -> ScheduledRestart
    where
        F: FnOnce(RestartTicket) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let superseded = self.cancel();

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let delay = self.delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(ticket, "Restart timer fired");
            fire(ticket).await;
        });

        debug!(ticket, delay_ms = delay.as_millis() as u64, superseded, "Restart scheduled");
        self.pending = Some(PendingRestart { ticket, task });

        ScheduledRestart { ticket, superseded }
    }

    /// Cancel the pending restart. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.task.abort();
                debug!(ticket = pending.ticket, "Pending restart cancelled");
                true
            }
            None => false,
        }
    }

    /// Accept a fired ticket.
    ///
    /// True exactly once, and only for the most recently scheduled ticket.
    pub fn claim(&mut self, ticket: RestartTicket) -> bool {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => {
                debug!(ticket, "Stale restart ticket discarded");
                false
            }
        }
    }

    /// True while a restart is waiting to fire or be claimed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for RestartScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
