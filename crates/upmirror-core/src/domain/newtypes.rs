//! Domain newtypes with validation
//!
//! Strongly-typed wrappers that ensure validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// A remote bucket path (must start with `/`)
///
/// Represents destination paths inside the bucket, e.g. `/media/live`.
/// The path must not end with `/` unless it is exactly the root `/`;
/// the trailing slash is appended by callers only where the listing
/// protocol requires it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a new RemotePath
    ///
    /// # Errors
    /// Returns an error if the path does not start with `/`, ends with `/`
    /// (except for the root itself), contains `//`, or contains a `..` segment.
    pub fn new(path: String) -> Result<Self, DomainError> {
        if !path.starts_with('/') {
            return Err(DomainError::InvalidRemotePath(format!(
                "must start with '/': {path}"
            )));
        }

        if path.len() > 1 && path.ends_with('/') {
            return Err(DomainError::InvalidRemotePath(format!(
                "must not end with '/' (except the root): {path}"
            )));
        }

        if path.len() > 1 && path.contains("//") {
            return Err(DomainError::InvalidRemotePath(format!(
                "contains double slashes: {path}"
            )));
        }

        if path.split('/').any(|segment| segment == "..") {
            return Err(DomainError::InvalidRemotePath(format!(
                "contains path traversal: {path}"
            )));
        }

        Ok(Self(path))
    }

    /// Create the root path `/`
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join a single file-name component onto this path
    ///
    /// # Errors
    /// Returns an error if the component is empty, contains `/`, or is a
    /// relative-path segment (`.` or `..`).
    pub fn join(&self, component: &str) -> Result<Self, DomainError> {
        if component.is_empty() || component.contains('/') || component == "." || component == ".." {
            return Err(DomainError::InvalidComponent(component.to_string()));
        }

        let joined = if self.0 == "/" {
            format!("/{component}")
        } else {
            format!("{}/{component}", self.0)
        };

        Ok(Self(joined))
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemotePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for RemotePath {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}
