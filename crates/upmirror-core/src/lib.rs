//! upmirror core - domain types and port definitions
//!
//! This crate contains the hexagonal core of the mirror daemon:
//! - **Domain types** - `SyncTarget`, `PendingUpload`, `UploadOutcome`, `CycleReport`
//! - **Port definitions** - the [`ObjectStore`](ports::object_store::ObjectStore)
//!   trait implemented by storage adapters, plus the error taxonomy at that seam
//! - **Configuration** - typed config with loading, validation and bootstrap
//!
//! # Architecture
//!
//! The domain module contains pure values with no I/O. Ports define trait
//! interfaces that adapter crates implement; the sync engine orchestrates
//! everything through those interfaces and never talks to the network itself.

pub mod config;
pub mod domain;
pub mod ports;
