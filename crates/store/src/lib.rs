//! Store Crate - TTL persistence for challenge state
//!
//! This crate provides the persistence layer between challenge generation
//! and verification:
//! - The `CaptchaStore` / `AsyncCaptchaStore` contracts: a TTL key-value
//!   map with a single-use `take` primitive
//! - In-memory backends for single-process deployments and tests
//! - Filesystem backends that keep one JSON file per challenge and
//!   survive process restarts
//!
//! Expired entries are swept lazily, so no background task is required.

pub mod contract;
pub mod error;
pub mod file;
pub mod memory;

pub use contract::{AsyncCaptchaStore, CaptchaStore};
pub use error::{StoreError, StoreResult};
pub use file::{AsyncFileStore, FileStore};
pub use memory::{AsyncMemoryStore, MemoryStore};
