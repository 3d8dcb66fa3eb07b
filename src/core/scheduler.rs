/// Cancelable periodic triggers backed by tokio tasks
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Spawn,
    Motion,
}

/// A periodic task that sends `kind` every `period`. Dropping it stops the task.
#[derive(Debug)]
pub struct Ticker {
    kind: TickKind,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Must be called from within a tokio runtime. The first tick fires one `period` after start.
    pub fn start(kind: TickKind, period: Duration, tx: UnboundedSender<TickKind>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(kind).is_err() {
                    // receiver gone, nothing left to drive
                    break;
                }
            }
        });
        Self { kind, handle }
    }

    pub fn kind(&self) -> TickKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The spawn and motion tickers of one running session
#[derive(Debug)]
pub struct TickSchedule {
    spawn: Ticker,
    motion: Ticker,
}

impl TickSchedule {
    pub fn start(spawn_every: Duration, motion_every: Duration, tx: UnboundedSender<TickKind>) -> Self {
        debug!(?spawn_every, ?motion_every, "tick schedule started");
        Self {
            spawn: Ticker::start(TickKind::Spawn, spawn_every, tx.clone()),
            motion: Ticker::start(TickKind::Motion, motion_every, tx),
        }
    }

    pub fn is_running(&self) -> bool {
        self.spawn.is_running() && self.motion.is_running()
    }

    /// Stops both tickers. Equivalent to dropping the schedule.
    pub fn stop(self) {}
}

impl Drop for TickSchedule {
    fn drop(&mut self) {
        debug!(spawn = ?self.spawn.kind(), motion = ?self.motion.kind(), "tick schedule stopped");
    }
}
