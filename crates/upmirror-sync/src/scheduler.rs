//! Fixed-interval scheduler driving mirror cycles
//!
//! The [`Scheduler`] owns a [`CycleRunner`] and alternates between two
//! states for the lifetime of the daemon:
//!
//! ```text
//! ┌──────┐  interval elapsed   ┌─────────┐
//! │ Idle │ ──────────────────→ │ Running │
//! └──────┘ ←────────────────── └─────────┘
//!            cycle finished
//! ```
//!
//! A cycle outcome (success or failure) never ends the loop; the only exit
//! is cancellation of the shutdown token. The wait is a plain fixed delay
//! measured from the end of the previous cycle, not an aligned tick, so a
//! slow cycle pushes the next run back rather than causing a burst.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use upmirror_core::domain::CycleReport;
use upmirror_core::ports::ObjectStore;

use crate::cycle::SyncCycle;

/// Anything the scheduler can run on a timer
///
/// [`SyncCycle`] is the production implementation; the seam exists so the
/// loop itself can be exercised without touching the filesystem or network.
#[async_trait::async_trait]
pub trait CycleRunner: Send + Sync {
    /// Runs one pass and reports what happened
    async fn run_once(&self) -> anyhow::Result<CycleReport>;
}

#[async_trait::async_trait]
impl<S: ObjectStore> CycleRunner for SyncCycle<S> {
    async fn run_once(&self) -> anyhow::Result<CycleReport> {
        SyncCycle::run_once(self).await
    }
}

/// Where the scheduler currently is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next interval to elapse
    Idle,
    /// A mirror cycle is in progress
    Running,
}

/// Runs mirror cycles at a fixed interval until shut down
pub struct Scheduler<R> {
    runner: R,
    interval: Duration,
    shutdown: CancellationToken,
    state: SchedulerState,
}

impl<R: CycleRunner> Scheduler<R> {
    /// Creates a scheduler running `runner` every `interval`
    ///
    /// Cancelling `shutdown` ends the loop: immediately while idle, or right
    /// after the in-flight cycle completes while running.
    pub fn new(runner: R, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            runner,
            interval,
            shutdown,
            state: SchedulerState::Idle,
        }
    }

    /// Current loop state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Runs cycles until the shutdown token is cancelled
    ///
    /// The first cycle starts immediately; each subsequent cycle starts one
    /// interval after the previous one finished.
    pub async fn run(&mut self) {
        info!(interval_secs = self.interval.as_secs(), "Mirror loop started");

        loop {
            self.state = SchedulerState::Running;
            match self.runner.run_once().await {
                Ok(report) => {
                    info!(
                        remote_files = report.remote_files,
                        pending = report.pending(),
                        uploaded = report.uploaded(),
                        failed = report.failed(),
                        duration_ms = report.duration_ms,
                        "Cycle completed"
                    );
                }
                Err(e) => {
                    error!(error = format!("{e:#}"), "Cycle aborted");
                }
            }
            self.state = SchedulerState::Idle;

            let next_run =
                chrono::Local::now() + chrono::Duration::seconds(self.interval.as_secs() as i64);
            info!(
                next_run = %next_run.format("%Y-%m-%d %H:%M:%S"),
                "Waiting for next cycle"
            );

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown requested, mirror loop stopping");
                    break;
                }
            }
        }
    }
}
