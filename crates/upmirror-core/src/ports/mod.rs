//! Port definitions (trait interfaces implemented by adapter crates)

pub mod object_store;

pub use object_store::{ListError, ObjectStore, UploadError};
