//! One full list→diff→upload pass
//!
//! A cycle is the unit of failure isolation. The remote listing is the only
//! hard dependency: if it fails the cycle aborts before any upload starts.
//! Everything after that point degrades per file: an upload that fails is
//! recorded in the report and the batch carries on.

use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::Context;
use tracing::{debug, error, info, warn};

use upmirror_core::domain::{CycleReport, PendingUpload, SyncTarget, UploadOutcome};
use upmirror_core::ports::ObjectStore;

/// Executes mirror cycles for a single [`SyncTarget`]
///
/// Holds the target and a store handle; both are fixed at construction, so
/// every cycle works against the same directory pair. State is rebuilt from
/// the two listings each pass; nothing survives between cycles.
pub struct SyncCycle<S> {
    store: S,
    target: SyncTarget,
}

impl<S: ObjectStore> SyncCycle<S> {
    /// Creates a cycle runner for the given store and target
    pub fn new(store: S, target: SyncTarget) -> Self {
        Self { store, target }
    }

    /// The target this runner mirrors
    pub fn target(&self) -> &SyncTarget {
        &self.target
    }

    /// Runs a single mirror pass and reports what happened
    ///
    /// # Errors
    /// Returns an error if the remote listing or the local directory scan
    /// fails; no uploads are attempted in that case. Individual upload
    /// failures do not error; they appear in the report's outcomes.
    pub async fn run_once(&self) -> anyhow::Result<CycleReport> {
        let started = Instant::now();

        let remote = self
            .store
            .list_files(&self.target.destination)
            .await
            .with_context(|| {
                format!("listing remote directory {}", self.target.destination)
            })?;
        debug!(remote_files = remote.len(), "Remote snapshot taken");

        let local = self.list_local().await?;
        debug!(local_files = local.len(), "Local directory scanned");

        let pending = super::diff::compute_pending(&local, &remote);
        let total = pending.len();
        if total == 0 {
            debug!("Nothing to upload");
        }

        let mut outcomes = Vec::with_capacity(total);
        for (idx, name) in pending.into_iter().enumerate() {
            let outcome = match self.stage(&name) {
                Ok(item) => {
                    info!("[{} of {}] Uploading {}", idx + 1, total, item.remote_path);
                    match self.store.upload_file(&item.local_path, &item.remote_path).await {
                        Ok(()) => {
                            info!("[{} of {}] Uploaded {}", idx + 1, total, item.remote_path);
                            UploadOutcome::Success
                        }
                        Err(e) => {
                            error!(file = %name, error = %e, "Upload failed");
                            UploadOutcome::Failure(e.to_string())
                        }
                    }
                }
                Err(e) => {
                    error!(file = %name, error = format!("{e:#}"), "Skipping unmappable file name");
                    UploadOutcome::Failure(format!("{e:#}"))
                }
            };
            outcomes.push((name, outcome));
        }

        Ok(CycleReport {
            remote_files: remote.len(),
            outcomes,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Resolves a pending name against both sides of the mirror
    fn stage(&self, name: &str) -> anyhow::Result<PendingUpload> {
        let remote_path = self.target.destination.join(name)?;
        Ok(PendingUpload {
            name: name.to_string(),
            local_path: self.target.source_dir.join(name),
            remote_path,
        })
    }

    /// Lists the names of regular files directly inside the source directory
    ///
    /// One level only: subdirectories and anything else that is not a plain
    /// file are skipped, matching what the remote listing reports. Names that
    /// are not valid UTF-8 cannot be expressed as remote paths and are
    /// skipped with a warning.
    async fn list_local(&self) -> anyhow::Result<BTreeSet<String>> {
        let dir = &self.target.source_dir;
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("reading source directory {}", dir.display()))?;

        let mut names = BTreeSet::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("reading source directory {}", dir.display()))?
        {
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("inspecting {}", entry.path().display()))?;
            if !file_type.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => {
                    names.insert(name);
                }
                Err(raw) => {
                    warn!(name = ?raw, "Skipping file with non-UTF-8 name");
                }
            }
        }
        Ok(names)
    }
}
