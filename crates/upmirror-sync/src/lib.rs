//! Upmirror Sync - one-way mirror engine
//!
//! Turns a [`SyncTarget`](upmirror_core::domain::SyncTarget) into periodic
//! upload work against an [`ObjectStore`](upmirror_core::ports::ObjectStore):
//!
//! ```text
//! Scheduler ──→ SyncCycle ──→ ObjectStore (list + upload)
//!                  │
//!              compute_pending (local − remote)
//! ```
//!
//! ## Modules
//!
//! - [`diff`] - Pure set difference between local and remote name listings
//! - [`cycle`] - One full list/diff/upload pass producing a [`CycleReport`](upmirror_core::domain::CycleReport)
//! - [`scheduler`] - Fixed-interval loop driving cycles until shutdown

pub mod cycle;
pub mod diff;
pub mod scheduler;

pub use cycle::SyncCycle;
pub use diff::compute_pending;
pub use scheduler::{CycleRunner, Scheduler, SchedulerState};
