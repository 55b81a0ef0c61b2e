//! Upyun REST API client
//!
//! Provides a thin authenticated HTTP client for the Upyun REST endpoint.
//! Handles credential headers and URL construction; the request/response
//! shapes live in [`listing`](crate::listing) and [`upload`](crate::upload).

use reqwest::{Client, Method, RequestBuilder};

/// Base URL for the Upyun REST API (auto-routed endpoint)
const API_BASE_URL: &str = "https://v0.api.upyun.com";

/// HTTP client for Upyun REST calls
///
/// Wraps `reqwest::Client` with HTTP Basic credentials and bucket-scoped
/// URL construction. Immutable after construction; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct RestClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// Bucket (service) name, prefixed onto every request path
    bucket: String,
    /// Operator name for Basic auth
    operator: String,
    /// Operator password for Basic auth
    password: String,
}

impl RestClient {
    /// Creates a new RestClient against the production endpoint
    pub fn new(
        bucket: impl Into<String>,
        operator: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_base_url(bucket, operator, password, API_BASE_URL)
    }

    /// Creates a new RestClient with a custom base URL (useful for testing)
    pub fn with_base_url(
        bucket: impl Into<String>,
        operator: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            bucket: bucket.into(),
            operator: operator.into(),
            password: password.into(),
        }
    }

    /// Returns the bucket name this client is scoped to
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// `path` is bucket-relative and must start with `/`. The bucket name is
    /// prepended automatically, so `/media/clip.mp4` becomes
    /// `{base_url}/{bucket}/media/clip.mp4`.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}{}", self.base_url, self.bucket, path);
        self.client
            .request(method, &url)
            .basic_auth(&self.operator, Some(&self.password))
    }
}
