// src/utils/timer.rs

use std::time::Duration;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::config::TICK_INTERVAL_SECS;

/// Whole seconds since a run started, republished once per tick.
///
/// The ticking task is cancelled by `stop()` or when the timer is dropped.
/// Must be started from inside a tokio runtime.
#[derive(Debug)]
pub struct ElapsedTimer {
    started_at: Instant,
    ticks: watch::Receiver<u64>,
    task: Option<JoinHandle<()>>,
    stopped_at: Option<u64>,
}

impl ElapsedTimer {
    pub fn start() -> Self {
        Self::start_at(0)
    }

    /// Starts a clock that already shows `offset_secs`, for a resumed run.
    pub fn start_at(offset_secs: u64) -> Self {
        let now = Instant::now();
        let started_at = now.checked_sub(Duration::from_secs(offset_secs)).unwrap_or(now);
        let (tx, ticks) = watch::channel(offset_secs);

        let task = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(TICK_INTERVAL_SECS));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(started_at.elapsed().as_secs()).is_err() {
                    break;
                }
            }
        });

        Self {
            started_at,
            ticks,
            task: Some(task),
            stopped_at: None,
        }
    }

    /// The value on display: last tick while running, final value once stopped.
    pub fn elapsed_secs(&self) -> u64 {
        self.stopped_at.unwrap_or_else(|| *self.ticks.borrow())
    }

    /// Cancels the tick and freezes the elapsed time. Idempotent.
    pub fn stop(&mut self) -> u64 {
        if let Some(secs) = self.stopped_at {
            return secs;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let secs = self.started_at.elapsed().as_secs();
        self.stopped_at = Some(secs);
        secs
    }
}

impl Drop for ElapsedTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// `m:ss`, as shown next to a running quiz.
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
