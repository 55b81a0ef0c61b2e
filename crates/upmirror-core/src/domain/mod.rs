//! Domain types for the mirror daemon
//!
//! Pure values only: no I/O, no clocks, no network. Everything here is
//! constructed once per startup (`SyncTarget`) or once per cycle
//! (`PendingUpload`, `CycleReport`) and never mutated afterwards.

pub mod errors;
pub mod newtypes;
pub mod report;
pub mod target;

pub use errors::DomainError;
pub use newtypes::RemotePath;
pub use report::{CycleReport, PendingUpload, UploadOutcome};
pub use target::SyncTarget;
