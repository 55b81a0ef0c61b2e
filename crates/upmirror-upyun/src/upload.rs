//! File upload against the Upyun REST API
//!
//! A single `PUT {dir}/{name}` request with the file content as the body
//! and an MD5 checksum attached under the API's verification key. Files
//! are never buffered whole for hashing: the checksum is computed over
//! fixed-size blocks, and the body is streamed from disk.

use std::path::Path;

use md5::{Digest, Md5};
use reqwest::header::CONTENT_LENGTH;
use reqwest::Method;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use upmirror_core::domain::newtypes::RemotePath;
use upmirror_core::ports::object_store::UploadError;

use crate::client::RestClient;

/// Request key carrying the content checksum.
///
/// This is the API's content-verification parameter: the server recomputes
/// the body's MD5 and rejects the write on mismatch. It is distinct in role
/// from transport-level integrity headers, but field names themselves are
/// case-insensitive on the wire (RFC 9110), so the HTTP stack is free to
/// normalize the spelling below.
const UPLOAD_CHECKSUM_KEY: &str = "Content-MD5";

/// Block size for streamed checksum computation
const CHECKSUM_BLOCK_SIZE: usize = 1024;

/// Computes the hex MD5 of a file, reading it in fixed-size blocks
///
/// Never loads the whole file into memory; uploads may be large.
pub async fn file_md5(path: &Path) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Md5::new();
    let mut buf = [0u8; CHECKSUM_BLOCK_SIZE];

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Uploads one local file to `dest` with integrity metadata attached
///
/// The body is streamed from disk; the checksum is computed first in a
/// separate pass. A 2xx response is success. No retry is attempted here;
/// a failed file reappears as pending on the next cycle.
///
/// # Errors
///
/// - [`UploadError::Io`] if the local file cannot be read
/// - [`UploadError::Transport`] for network-level failures
/// - [`UploadError::Status`] for non-2xx responses, carrying status + body
pub async fn upload_file(
    client: &RestClient,
    local: &Path,
    dest: &RemotePath,
) -> Result<(), UploadError> {
    let checksum = file_md5(local)
        .await
        .map_err(|e| UploadError::Io(e.to_string()))?;

    let file = tokio::fs::File::open(local)
        .await
        .map_err(|e| UploadError::Io(e.to_string()))?;
    let length = file
        .metadata()
        .await
        .map_err(|e| UploadError::Io(e.to_string()))?
        .len();

    debug!(
        local = %local.display(),
        dest = %dest,
        bytes = length,
        "Uploading file"
    );

    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let response = client
        .request(Method::PUT, dest.as_str())
        .header(CONTENT_LENGTH, length)
        .header(UPLOAD_CHECKSUM_KEY, &checksum)
        .body(body)
        .send()
        .await
        .map_err(|e| UploadError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        debug!(dest = %dest, "Upload acknowledged");
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(UploadError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
