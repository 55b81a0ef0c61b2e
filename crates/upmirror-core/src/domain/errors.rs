//! Domain error types

use thiserror::Error;

/// Errors that can occur when constructing domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote path format
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),

    /// Invalid path component when joining onto a remote path
    #[error("Invalid path component: {0}")]
    InvalidComponent(String),
}
