//! The visibility engine: single-record decisions and filter construction.

use std::sync::Arc;

use tracing::debug;

use crate::error::DomainResult;
use crate::filter::FilterExpression;
use crate::model::{fields, PermissionEntry, RecordOwnership};
use crate::permission::classify;
use crate::resolver::{ResolverConfig, RoleDirectory, SubordinateResolver, UserDirectory};

/// Decides record visibility for a user.
///
/// The engine is stateless apart from the resolver's optional cache; each
/// call is a pure function of its inputs plus read-only directory lookups,
/// so concurrent use needs no locking.
pub struct VisibilityEngine<R, U> {
    resolver: SubordinateResolver<R, U>,
}

impl<R, U> VisibilityEngine<R, U>
where
    R: RoleDirectory + 'static,
    U: UserDirectory + 'static,
{
    /// Creates an engine with default resolver configuration.
    pub fn new(role_directory: Arc<R>, user_directory: Arc<U>) -> Self {
        Self {
            resolver: SubordinateResolver::new(role_directory, user_directory),
        }
    }

    /// Creates an engine with custom resolver configuration.
    pub fn with_config(
        role_directory: Arc<R>,
        user_directory: Arc<U>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            resolver: SubordinateResolver::with_config(role_directory, user_directory, config),
        }
    }

    /// Returns the underlying subordinate resolver.
    pub fn resolver(&self) -> &SubordinateResolver<R, U> {
        &self.resolver
    }

    /// Decides whether `user_id` may see a single record.
    pub async fn can_view(
        &self,
        record: &RecordOwnership,
        user_id: &str,
        permissions: &[PermissionEntry],
        module: &str,
    ) -> DomainResult<bool> {
        let requested = classify(permissions, module);
        if requested.is_super_admin {
            return Ok(true);
        }

        // A record moved into a sub-module answers to that sub-module's
        // permissions, not the ones it was requested under.
        let effective_module = record.effective_module(module);
        let caps = if effective_module == module {
            requested
        } else {
            classify(permissions, effective_module)
        };

        if caps.is_module_admin {
            return Ok(true);
        }
        if !caps.has_basic_view && !caps.has_junior_cascade {
            debug!(user_id, module = effective_module, "no view capability, denying");
            return Ok(false);
        }

        if Self::is_owner(record, user_id) {
            return Ok(true);
        }

        if caps.has_junior_cascade {
            if record.assigned_to.is_unassigned() {
                return Ok(true);
            }

            let subordinates = self.resolver.resolve(user_id).await?;
            if record
                .created_by
                .as_deref()
                .is_some_and(|creator| subordinates.contains(creator))
            {
                return Ok(true);
            }
            if record
                .assigned_to
                .iter()
                .any(|assignee| subordinates.contains(assignee))
            {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Builds a filter matching every record `user_id` may see in
    /// `module`, narrowed by `extra` when given.
    ///
    /// Admin-tier users get `extra` back unchanged; users without any
    /// view capability get the deny sentinel. Everyone else gets the
    /// ownership disjunction, extended with subordinate and unassigned
    /// clauses when junior cascade is granted.
    pub async fn build_filter(
        &self,
        user_id: &str,
        permissions: &[PermissionEntry],
        module: &str,
        extra: Option<FilterExpression>,
    ) -> DomainResult<FilterExpression> {
        let caps = classify(permissions, module);
        let extra = extra.unwrap_or(FilterExpression::All);

        if caps.is_super_admin || caps.is_module_admin {
            return Ok(extra);
        }
        if !caps.has_basic_view && !caps.has_junior_cascade {
            debug!(user_id, module, "no view capability, deny-all filter");
            return Ok(FilterExpression::None);
        }

        // Both assignee storage forms are always queried: historical
        // records hold a scalar, newer ones a list. Dropping either term
        // silently hides records from their own assignee.
        let mut reachable = vec![
            FilterExpression::eq(fields::CREATED_BY, user_id),
            FilterExpression::eq(fields::ASSIGNED_TO, user_id),
            FilterExpression::has(fields::ASSIGNED_TO, user_id),
            FilterExpression::has(fields::ASSIGN_REPORT_TO, user_id),
        ];

        if caps.has_junior_cascade {
            let subordinates = self.resolver.resolve(user_id).await?;
            if !subordinates.is_empty() {
                let mut ordered: Vec<String> = subordinates.into_iter().collect();
                ordered.sort();
                reachable.push(FilterExpression::is_in(fields::CREATED_BY, ordered.clone()));
                reachable.push(FilterExpression::is_in(fields::ASSIGNED_TO, ordered.clone()));
                reachable.push(FilterExpression::has_any(fields::ASSIGNED_TO, ordered));
            }
            reachable.push(FilterExpression::Unassigned);
        }

        Ok(FilterExpression::and([
            FilterExpression::or(reachable),
            extra,
        ]))
    }

    /// Ownership: creator, assignee under either storage form, or
    /// explicit reporter.
    fn is_owner(record: &RecordOwnership, user_id: &str) -> bool {
        record.created_by.as_deref() == Some(user_id)
            || record.assigned_to.contains(user_id)
            || record.assign_report_to.iter().any(|id| id == user_id)
    }
}
