//! upmirror upyun - Upyun REST API adapter
//!
//! Implements the [`ObjectStore`](upmirror_core::ports::object_store::ObjectStore)
//! port against the Upyun REST API:
//! - Cursor-paginated directory listing with the end-of-listing sentinel
//! - Single-request PUT uploads with a streamed MD5 checksum attached
//!
//! ## Modules
//!
//! - [`client`] - Authenticated HTTP client for the REST endpoint
//! - [`listing`] - Paginated directory listing
//! - [`upload`] - File upload with integrity metadata
//! - [`store`] - `ObjectStore` implementation tying the above together

pub mod client;
pub mod listing;
pub mod store;
pub mod upload;

pub use client::RestClient;
pub use listing::LIST_ITER_EOF;
pub use store::UpyunStore;
