//! Storage trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use sightline_domain::filter::FilterExpression;
use sightline_domain::model::{Role, User};

use crate::error::StorageResult;

/// A stored record document with bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    /// The record body as a JSON object; ownership fields live here under
    /// their document field names.
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative operations over the role forest and user directory.
///
/// These are the write-side counterpart of the read-only lookups the
/// resolver consumes. Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DirectoryStore: Send + Sync + 'static {
    /// Creates or replaces a role.
    async fn put_role(&self, role: Role) -> StorageResult<()>;

    /// Deletes a role.
    async fn delete_role(&self, role_id: &str) -> StorageResult<()>;

    /// Lists all roles, ordered by ID.
    async fn list_roles(&self) -> StorageResult<Vec<Role>>;

    /// Creates or replaces a user.
    async fn put_user(&self, user: User) -> StorageResult<()>;

    /// Deletes a user.
    async fn delete_user(&self, user_id: &str) -> StorageResult<()>;
}

/// Record-document operations the visibility filter is applied against.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Inserts a new record. The document must be a JSON object.
    async fn insert_record(&self, id: &str, document: Value) -> StorageResult<StoredRecord>;

    /// Gets a record by ID.
    async fn get_record(&self, id: &str) -> StorageResult<StoredRecord>;

    /// Replaces a record's document, bumping `updated_at`.
    async fn update_record(&self, id: &str, document: Value) -> StorageResult<StoredRecord>;

    /// Deletes a record.
    async fn delete_record(&self, id: &str) -> StorageResult<()>;

    /// Returns the records matching `filter`, ordered by ID.
    async fn list_records(&self, filter: &FilterExpression) -> StorageResult<Vec<StoredRecord>>;

    /// Counts the records matching `filter`.
    async fn count_records(&self, filter: &FilterExpression) -> StorageResult<usize>;
}
