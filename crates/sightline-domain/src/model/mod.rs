//! Core data model: permission entries, roles, users, record ownership.
//!
//! This module contains:
//! - Permission entry shapes (`ModuleSelector`, `ActionSet`, `Action`)
//! - Directory types (`Role`, `User`)
//! - Record ownership fields (`RecordOwnership`, `Assignees`)

mod types;

pub use types::*;
