//! Integration tests for the Upyun REST adapter
//!
//! Uses wiremock to stand in for the REST endpoint. Organized as a single
//! test binary with shared helpers in `common`.

mod common;
mod test_listing;
mod test_upload;
