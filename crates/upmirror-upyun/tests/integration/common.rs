//! Shared test helpers for Upyun REST integration tests
//!
//! Provides wiremock-based mock server setup for the listing and upload
//! endpoints, returning a configured client pointing at the mock server.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use upmirror_upyun::listing::LIST_ITER_EOF;
use upmirror_upyun::RestClient;

/// Bucket name used by every test client.
pub const TEST_BUCKET: &str = "test-bucket";

/// Starts a mock server and returns it with a client scoped to
/// [`TEST_BUCKET`] and pointed at the server.
pub async fn setup_client() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let client = RestClient::with_base_url(TEST_BUCKET, "op", "pw", server.uri());
    (server, client)
}

/// Builds a listing page body with the given entries and next cursor.
///
/// Each entry is a `(name, type)` pair; pass `"folder"` as the type for
/// directories.
pub fn listing_page(entries: &[(&str, &str)], iter: &str) -> serde_json::Value {
    let files: Vec<serde_json::Value> = entries
        .iter()
        .map(|(name, kind)| serde_json::json!({"name": name, "type": kind}))
        .collect();
    serde_json::json!({"iter": iter, "files": files})
}

/// Mounts a terminal listing page (cursor = sentinel) for `dir_path`.
///
/// `dir_path` is the bucket-relative directory path including the trailing
/// slash, e.g. `/media/`.
pub async fn mount_listing_single_page(
    server: &MockServer,
    dir_path: &str,
    entries: &[(&str, &str)],
) {
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_BUCKET}{dir_path}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing_page(entries, LIST_ITER_EOF)),
        )
        .mount(server)
        .await;
}

/// Mounts a continuation page that only matches requests carrying the
/// given cursor in the `x-list-iter` header.
///
/// Requests without the expected cursor fall through to other mounted
/// mocks (or 404), so these mocks double as cursor-propagation asserts.
pub async fn mount_listing_cursor_page(
    server: &MockServer,
    dir_path: &str,
    cursor: &str,
    body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_BUCKET}{dir_path}")))
        .and(header("x-list-iter", cursor))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
