//! Object store port (driven/secondary port)
//!
//! Defines the interface the sync engine uses to talk to remote bucket
//! storage. The primary implementation targets the Upyun REST API, but the
//! trait carries no provider-specific detail so tests can substitute a mock.
//!
//! ## Design Notes
//!
//! - Errors are typed rather than `anyhow` because the sync engine reacts
//!   differently to the two failure classes: a [`ListError`] aborts the
//!   whole cycle, an [`UploadError`] is confined to one file.
//! - `Transport` variants carry the error message as a `String` so the
//!   core crate stays free of HTTP-client dependencies.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use crate::domain::newtypes::RemotePath;

/// Errors that can occur while listing the remote directory
///
/// Any of these means the remote snapshot is unknown. Callers must treat
/// that as "abort this cycle": a partial name set would either trigger
/// spurious re-uploads or, worse, make absent files look present.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListError {
    /// A listing page came back with a non-200 status
    #[error("listing returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code of the failed page
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// A network-level error occurred before a status was received
    #[error("listing transport error: {0}")]
    Transport(String),

    /// A page body could not be decoded as the expected JSON shape
    #[error("malformed listing response: {0}")]
    Decode(String),
}

/// Errors that can occur while uploading a single file
///
/// Confined to the file being uploaded; the cycle carries on with the
/// remaining pending files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The remote API rejected the write with a non-2xx status
    #[error("upload returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code of the rejected write
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// A network-level error occurred during the write
    #[error("upload transport error: {0}")]
    Transport(String),

    /// The local file could not be read
    #[error("upload IO error: {0}")]
    Io(String),
}

/// Port trait for remote bucket operations
///
/// Implementations own the credentials and the HTTP plumbing. Both methods
/// take the fully resolved remote path so the engine stays in charge of
/// path construction.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the complete set of remote file names under `dir`
    ///
    /// Follows the listing API's continuation cursor across however many
    /// pages it takes; entries of directory kind are excluded. The returned
    /// set is a point-in-time snapshot and must never be cached by callers.
    async fn list_files(&self, dir: &RemotePath) -> Result<BTreeSet<String>, ListError>;

    /// Uploads one local file to `dest`, with integrity metadata attached
    ///
    /// A 2xx response is success. No retry is attempted here; a failed file
    /// simply reappears as pending on the next cycle.
    async fn upload_file(&self, local: &Path, dest: &RemotePath) -> Result<(), UploadError>;
}
