//! Storage abstractions behind the persistence adapter.
//!
//! # Responsibility
//! - Define the key-value contract the adapter writes slices through.
//! - Isolate SQLite details from state and service code.

pub mod kv_repo;
