//! Set difference between local and remote name listings
//!
//! The upload decision is purely name-based: a file needs uploading exactly
//! when its name is present locally and absent remotely. Content, size and
//! modification times never enter the comparison, so a remote file is never
//! overwritten once it exists under the destination directory.

use std::collections::BTreeSet;

/// Computes the names that exist locally but not remotely, in ascending
/// lexicographic order.
///
/// Both inputs are full listings for the same directory level; the result is
/// the exact upload set for one cycle. Remote-only names are ignored, this
/// mirror never deletes.
pub fn compute_pending(local: &BTreeSet<String>, remote: &BTreeSet<String>) -> Vec<String> {
    local.difference(remote).cloned().collect()
}
