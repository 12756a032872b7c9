//! Capability classification over permission entries.

use crate::model::{Action, ModuleSelector, PermissionEntry};

/// Capability flags for one user in one module.
///
/// A default (all-false) value means deny-all; callers must treat it as
/// "no records visible", never as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Sees every record of every module.
    pub is_super_admin: bool,
    /// Sees every record of the target module.
    pub is_module_admin: bool,
    /// Sees records they created, are assigned to, or report on.
    pub has_basic_view: bool,
    /// Additionally sees subordinates' records and unassigned records.
    pub has_junior_cascade: bool,
}

impl Capabilities {
    /// Returns whether any capability at all was granted.
    pub fn any_view(&self) -> bool {
        self.is_super_admin || self.is_module_admin || self.has_basic_view || self.has_junior_cascade
    }
}

/// Classifies `entries` into capability flags for `module`.
///
/// Super-admin requires the bare wildcard on both the module and the
/// actions *string*; a module-scoped entry whose action list merely
/// contains `"*"` is module admin, not super admin. Entries that match
/// nothing contribute nothing.
pub fn classify(entries: &[PermissionEntry], module: &str) -> Capabilities {
    let mut caps = Capabilities::default();

    for entry in entries {
        if entry.module == ModuleSelector::Any && entry.actions.is_full_wildcard() {
            caps.is_super_admin = true;
        }

        if !entry.module.matches(module) {
            continue;
        }

        let module_wide = entry.actions.is_full_wildcard()
            || entry.actions.grants(&Action::Wildcard)
            || entry.actions.grants(&Action::All);

        if module_wide {
            caps.is_module_admin = true;
        }
        if module_wide || entry.actions.grants(&Action::Show) {
            caps.has_basic_view = true;
        }
        if module_wide || entry.actions.grants(&Action::Junior) {
            caps.has_junior_cascade = true;
        }
    }

    caps
}
