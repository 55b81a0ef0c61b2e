//! Paginated directory listing against the Upyun REST API
//!
//! The listing endpoint is cursor-paginated: each `GET {dir}/` call may
//! carry an opaque continuation cursor in the `x-list-iter` request header
//! (absent on the first call) and returns a JSON page
//! `{ "iter": "...", "files": [{ "name": "...", "type": "..." }, ...] }`.
//! Pagination ends when the returned cursor equals [`LIST_ITER_EOF`].
//!
//! A failed page fails the whole listing: a partial name set would make
//! the caller either re-upload files that are already present or, worse,
//! treat absent files as present.

use std::collections::BTreeSet;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::debug;

use upmirror_core::domain::newtypes::RemotePath;
use upmirror_core::ports::object_store::ListError;

use crate::client::RestClient;

/// End-of-listing sentinel cursor.
///
/// External protocol detail: the API signals "no further pages" by
/// returning this exact opaque token as the next cursor, not by an empty
/// or absent value. It must be compared verbatim and never decoded.
pub const LIST_ITER_EOF: &str = "g2gCZAAEbmV4dGQAA2VvZg";

/// Request header carrying the continuation cursor
const LIST_ITER_HEADER: &str = "x-list-iter";

// ============================================================================
// Listing API response types
// ============================================================================

/// One page of the listing response
#[derive(Debug, Deserialize)]
struct ListPage {
    /// Continuation cursor for the next page (or [`LIST_ITER_EOF`])
    iter: String,
    /// Entries on this page
    #[serde(default)]
    files: Vec<RemoteEntry>,
}

/// A single entry from a listing page
///
/// Ephemeral: folded into the result set and discarded. The `type` field
/// is `"folder"` for directories; anything else counts as a file.
#[derive(Debug, Deserialize)]
struct RemoteEntry {
    /// Entry name (file or directory name)
    name: String,
    /// Entry kind as reported by the API
    #[serde(rename = "type")]
    kind: String,
}

impl RemoteEntry {
    fn is_folder(&self) -> bool {
        self.kind == "folder"
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Fetches the complete set of file names under `dir`, following pagination
///
/// Directory entries are excluded. Returns the union of all pages' file
/// names once the sentinel cursor is observed.
///
/// # Errors
///
/// Fails the whole operation (never a partial set) if any page returns a
/// non-200 status, a transport error occurs, or a page body cannot be
/// decoded.
pub async fn list_dir(
    client: &RestClient,
    dir: &RemotePath,
) -> Result<BTreeSet<String>, ListError> {
    // The listing endpoint addresses the directory with a trailing slash.
    let path = if dir.as_str() == "/" {
        "/".to_string()
    } else {
        format!("{}/", dir.as_str())
    };

    let mut names = BTreeSet::new();
    let mut cursor: Option<String> = None;
    let mut page_count: u32 = 0;

    loop {
        page_count += 1;

        let mut request = client
            .request(Method::GET, &path)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(ref iter) = cursor {
            request = request.header(LIST_ITER_HEADER, iter);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ListError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ListError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page: ListPage = response
            .json()
            .await
            .map_err(|e| ListError::Decode(e.to_string()))?;

        debug!(
            page = page_count,
            entries = page.files.len(),
            "Received listing page"
        );

        for entry in page.files {
            if !entry.is_folder() {
                names.insert(entry.name);
            }
        }

        if page.iter == LIST_ITER_EOF {
            break;
        }
        cursor = Some(page.iter);
    }

    debug!(
        files = names.len(),
        pages = page_count,
        "Listing complete"
    );

    Ok(names)
}

// ============================================================================
// Tests
// ============================================================================
