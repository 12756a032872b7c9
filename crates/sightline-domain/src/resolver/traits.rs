//! Traits for directory lookups needed by the resolver.

use async_trait::async_trait;

use crate::error::DomainResult;
use crate::model::{Role, User};

/// Role-directory operations needed by the resolver.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Looks up a user by ID. An absent user is `None`, not an error.
    async fn get_user(&self, user_id: &str) -> DomainResult<Option<User>>;

    /// Returns the roles whose parent is `role_id`. A role with no
    /// children returns an empty list.
    async fn get_direct_child_roles(&self, role_id: &str) -> DomainResult<Vec<Role>>;
}

/// User-directory operations needed by the resolver.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns all users attached to `role_id`.
    async fn get_users_by_role(&self, role_id: &str) -> DomainResult<Vec<User>>;
}
