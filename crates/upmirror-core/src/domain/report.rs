//! Per-cycle work items and reporting
//!
//! These values are computed fresh each cycle from the set difference
//! between the local listing and the remote snapshot, and discarded when
//! the cycle ends. Outcomes are logged, never persisted.

use std::path::PathBuf;

use super::newtypes::RemotePath;

/// A local file that is absent from the current remote snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    /// Bare file name as it appears in both listings
    pub name: String,
    /// Resolved path of the local file
    pub local_path: PathBuf,
    /// Resolved destination path inside the bucket
    pub remote_path: RemotePath,
}

/// Result of a single upload attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The remote API acknowledged the write with a 2xx status
    Success,
    /// The upload failed; the reason carries the HTTP status and body
    /// or the transport/IO error message
    Failure(String),
}

impl UploadOutcome {
    /// Returns true for [`UploadOutcome::Success`]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Summary of one completed list→diff→upload pass
///
/// Produced by the sync cycle and logged by the scheduler. A report is
/// produced whenever the remote listing succeeded, regardless of how many
/// individual uploads failed.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Number of files present remotely when the cycle started
    pub remote_files: usize,
    /// Per-file outcomes in the order uploads were attempted
    pub outcomes: Vec<(String, UploadOutcome)>,
    /// Wall-clock duration of the whole cycle in milliseconds
    pub duration_ms: u64,
}

impl CycleReport {
    /// Number of files that were pending at the start of the cycle
    #[must_use]
    pub fn pending(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of successful uploads
    #[must_use]
    pub fn uploaded(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    /// Number of failed uploads
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.uploaded()
    }
}
