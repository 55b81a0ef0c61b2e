//! The immutable synchronization target
//!
//! A [`SyncTarget`] is created once at startup from validated configuration
//! and read-only for the daemon's lifetime. Credentials live in the store
//! adapter built from the same configuration, so they never travel through
//! the sync engine (and never end up in its logs).

use std::path::PathBuf;

use super::newtypes::RemotePath;

/// What to mirror and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    /// Local directory whose top-level files are mirrored
    pub source_dir: PathBuf,
    /// Destination path inside the bucket
    pub destination: RemotePath,
    /// Seconds between sync cycles
    pub check_interval: u64,
}

impl SyncTarget {
    /// Create a new SyncTarget
    #[must_use]
    pub fn new(source_dir: PathBuf, destination: RemotePath, check_interval: u64) -> Self {
        Self {
            source_dir,
            destination,
            check_interval,
        }
    }
}
