//! In-memory storage implementation for testing and embedding.
//!
//! Uses DashMap for thread-safe concurrent access without explicit locks.
//! Role-child and user-by-role lookups are linear scans over the tables,
//! which is fine at directory scale (hundreds of roles, thousands of
//! users); record listing scans all documents and evaluates the filter
//! in-process.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use tracing::instrument;

use sightline_domain::error::DomainResult;
use sightline_domain::filter::FilterExpression;
use sightline_domain::model::{Role, User};
use sightline_domain::resolver::{RoleDirectory, UserDirectory};

use crate::error::{StorageError, StorageResult};
use crate::query;
use crate::traits::{DirectoryStore, RecordStore, StoredRecord};

/// In-memory role/user directory.
///
/// Implements both the administrative `DirectoryStore` interface and the
/// read-side `RoleDirectory`/`UserDirectory` traits the resolver
/// consumes, so one instance can be shared between the engine and the
/// code that seeds it.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    roles: DashMap<String, Role>,
    users: DashMap<String, User>,
}

impl MemoryDirectory {
    /// Creates a new in-memory directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory directory wrapped in Arc.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectory {
    async fn put_role(&self, role: Role) -> StorageResult<()> {
        self.roles.insert(role.id.clone(), role);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_role(&self, role_id: &str) -> StorageResult<()> {
        if self.roles.remove(role_id).is_none() {
            return Err(StorageError::RoleNotFound {
                role_id: role_id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_roles(&self) -> StorageResult<Vec<Role>> {
        let mut roles: Vec<Role> = self.roles.iter().map(|r| r.value().clone()).collect();
        roles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(roles)
    }

    async fn put_user(&self, user: User) -> StorageResult<()> {
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: &str) -> StorageResult<()> {
        if self.users.remove(user_id).is_none() {
            return Err(StorageError::UserNotFound {
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RoleDirectory for MemoryDirectory {
    async fn get_user(&self, user_id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(user_id).map(|u| u.value().clone()))
    }

    async fn get_direct_child_roles(&self, role_id: &str) -> DomainResult<Vec<Role>> {
        Ok(self
            .roles
            .iter()
            .filter(|r| r.value().parent_role_id.as_deref() == Some(role_id))
            .map(|r| r.value().clone())
            .collect())
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn get_users_by_role(&self, role_id: &str) -> DomainResult<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.value().role_id.as_deref() == Some(role_id))
            .map(|u| u.value().clone())
            .collect())
    }
}

/// In-memory document record store.
///
/// Documents are validated to be JSON objects on every write, so listing
/// never meets a malformed document.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: DashMap<String, StoredRecord>,
}

impl MemoryRecordStore {
    /// Creates a new in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory record store wrapped in Arc.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn require_object(document: &Value) -> StorageResult<()> {
        if !document.is_object() {
            return Err(StorageError::InvalidDocument {
                message: "record documents must be JSON objects".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    #[instrument(skip(self, document))]
    async fn insert_record(&self, id: &str, document: Value) -> StorageResult<StoredRecord> {
        Self::require_object(&document)?;

        let now = Utc::now();
        let record = StoredRecord {
            id: id.to_string(),
            document,
            created_at: now,
            updated_at: now,
        };

        // Atomic entry API prevents a race between existence check and
        // insert.
        use dashmap::mapref::entry::Entry;
        match self.records.entry(id.to_string()) {
            Entry::Occupied(_) => Err(StorageError::RecordAlreadyExists {
                record_id: id.to_string(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn get_record(&self, id: &str) -> StorageResult<StoredRecord> {
        self.records
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| StorageError::RecordNotFound {
                record_id: id.to_string(),
            })
    }

    #[instrument(skip(self, document))]
    async fn update_record(&self, id: &str, document: Value) -> StorageResult<StoredRecord> {
        Self::require_object(&document)?;

        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| StorageError::RecordNotFound {
                record_id: id.to_string(),
            })?;
        entry.document = document;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    #[instrument(skip(self))]
    async fn delete_record(&self, id: &str) -> StorageResult<()> {
        if self.records.remove(id).is_none() {
            return Err(StorageError::RecordNotFound {
                record_id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_records(&self, filter: &FilterExpression) -> StorageResult<Vec<StoredRecord>> {
        let mut matched: Vec<StoredRecord> = self
            .records
            .iter()
            .filter(|r| query::matches(filter, &r.value().document))
            .map(|r| r.value().clone())
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matched)
    }

    async fn count_records(&self, filter: &FilterExpression) -> StorageResult<usize> {
        Ok(self
            .records
            .iter()
            .filter(|r| query::matches(filter, &r.value().document))
            .count())
    }
}
