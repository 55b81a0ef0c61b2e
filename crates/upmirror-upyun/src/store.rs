//! `ObjectStore` implementation backed by the Upyun REST API

use std::collections::BTreeSet;
use std::path::Path;

use upmirror_core::domain::newtypes::RemotePath;
use upmirror_core::ports::object_store::{ListError, ObjectStore, UploadError};

use crate::client::RestClient;
use crate::{listing, upload};

/// Adapter that satisfies the [`ObjectStore`] port with Upyun REST calls
///
/// Owns the authenticated client (and therefore the credentials); immutable
/// for the daemon's lifetime.
#[derive(Clone)]
pub struct UpyunStore {
    client: RestClient,
}

impl UpyunStore {
    /// Creates a new store around an authenticated client
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ObjectStore for UpyunStore {
    async fn list_files(&self, dir: &RemotePath) -> Result<BTreeSet<String>, ListError> {
        listing::list_dir(&self.client, dir).await
    }

    async fn upload_file(&self, local: &Path, dest: &RemotePath) -> Result<(), UploadError> {
        upload::upload_file(&self.client, local, dest).await
    }
}
