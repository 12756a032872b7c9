//! Subordinate resolution: the role-hierarchy walk.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::DomainResult;

use super::config::ResolverConfig;
use super::traits::{RoleDirectory, UserDirectory};

/// Resolves the transitive set of users subordinate to a manager.
///
/// Subordinates are the users attached to roles strictly below the
/// manager's role; users sharing the manager's own role are not included.
/// Unknown managers and managers without a role resolve to the empty set.
pub struct SubordinateResolver<R, U> {
    role_directory: Arc<R>,
    user_directory: Arc<U>,
    config: ResolverConfig,
}

impl<R, U> SubordinateResolver<R, U>
where
    R: RoleDirectory + 'static,
    U: UserDirectory + 'static,
{
    /// Creates a new resolver with default configuration.
    pub fn new(role_directory: Arc<R>, user_directory: Arc<U>) -> Self {
        Self {
            role_directory,
            user_directory,
            config: ResolverConfig::default(),
        }
    }

    /// Creates a new resolver with custom configuration.
    pub fn with_config(
        role_directory: Arc<R>,
        user_directory: Arc<U>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            role_directory,
            user_directory,
            config,
        }
    }

    /// Returns the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Computes the IDs of every user transitively subordinate to
    /// `manager_user_id`.
    ///
    /// Directory call failures propagate; absent data degrades to an
    /// empty set.
    pub async fn resolve(&self, manager_user_id: &str) -> DomainResult<HashSet<String>> {
        let Some(manager) = self.role_directory.get_user(manager_user_id).await? else {
            debug!(user_id = %manager_user_id, "manager not found, no subordinates");
            return Ok(HashSet::new());
        };
        let Some(root_role_id) = manager.role_id else {
            debug!(user_id = %manager_user_id, "manager has no role, no subordinates");
            return Ok(HashSet::new());
        };

        if let Some(cache) = self.config.cache.as_deref() {
            if let Some(cached) = cache.get(manager_user_id).await {
                return Ok((*cached).clone());
            }
        }

        let subordinate_roles = self.collect_subordinate_roles(&root_role_id).await?;
        let user_ids = self.collect_role_users(&subordinate_roles).await?;

        if let Some(cache) = self.config.cache.as_deref() {
            cache
                .insert(manager_user_id, Arc::new(user_ids.clone()))
                .await;
        }

        Ok(user_ids)
    }

    /// Level-order walk collecting the strict descendants of
    /// `root_role_id`.
    async fn collect_subordinate_roles(&self, root_role_id: &str) -> DomainResult<HashSet<String>> {
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(root_role_id.to_string());

        let mut subordinates: HashSet<String> = HashSet::new();
        let mut frontier: Vec<String> = vec![root_role_id.to_string()];
        let mut depth = 0u32;

        while !frontier.is_empty() {
            if depth >= self.config.max_depth {
                warn!(
                    max_depth = self.config.max_depth,
                    unexpanded_roles = frontier.len(),
                    "hierarchy depth bound hit, returning partial subordinate set"
                );
                break;
            }
            depth += 1;

            // Sibling lookups within one level are independent of each
            // other; the next level is only known once they all return.
            let levels: Vec<DomainResult<Vec<crate::model::Role>>> =
                stream::iter(frontier.drain(..))
                    .map(|role_id| async move {
                        self.role_directory.get_direct_child_roles(&role_id).await
                    })
                    .buffer_unordered(self.config.lookup_concurrency)
                    .collect()
                    .await;

            let mut next_frontier = Vec::new();
            for fetched in levels {
                for role in fetched? {
                    if !visited.insert(role.id.clone()) {
                        warn!(role_id = %role.id, "cycle in role hierarchy, skipping revisited role");
                        continue;
                    }
                    subordinates.insert(role.id.clone());
                    next_frontier.push(role.id);
                }
            }
            frontier = next_frontier;
        }

        Ok(subordinates)
    }

    /// Maps every subordinate role to its users and unions the IDs.
    async fn collect_role_users(&self, role_ids: &HashSet<String>) -> DomainResult<HashSet<String>> {
        let fetched: Vec<_> = stream::iter(role_ids.iter())
            .map(|role_id| async move { self.user_directory.get_users_by_role(role_id).await })
            .buffer_unordered(self.config.lookup_concurrency)
            .collect()
            .await;

        let mut user_ids = HashSet::new();
        for users in fetched {
            for user in users? {
                user_ids.insert(user.id);
            }
        }
        Ok(user_ids)
    }
}
