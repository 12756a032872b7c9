//! Subordinate resolution over the role hierarchy.
//!
//! The resolver walks the role forest downward from a manager's role to
//! compute the transitive set of subordinate users.
//!
//! # Design
//!
//! - **Level-order traversal**: each level's roles are only known once the
//!   previous level's child lookups complete, so levels are sequential
//!   while sibling lookups within a level run concurrently
//!   (`buffer_unordered`).
//! - **Cycle safety**: a visited set guards against malformed hierarchy
//!   data; a revisited role is skipped, never re-expanded.
//! - **Depth bound**: traversal depth is capped (default 25). Hitting the
//!   bound terminates the walk and returns what was resolved. A partial
//!   set only ever hides records, which is the safe direction.

mod config;
mod hierarchy;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use config::ResolverConfig;
pub use hierarchy::SubordinateResolver;
pub use traits::{RoleDirectory, UserDirectory};
