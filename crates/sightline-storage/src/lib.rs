//! sightline-storage: collaborator implementations for the visibility
//! engine.
//!
//! The engine consumes a role/user directory and produces filter
//! expressions for a record store to apply. This crate provides both
//! sides for embedding and testing:
//! - `traits`   - administrative directory and record-store interfaces
//! - `memory`   - DashMap-backed in-memory implementations
//! - `query`    - filter lowering to document-store queries, and the
//!   in-process evaluator

pub mod error;
pub mod memory;
pub mod query;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::{MemoryDirectory, MemoryRecordStore};
pub use traits::{DirectoryStore, RecordStore, StoredRecord};
