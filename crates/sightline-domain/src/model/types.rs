//! Typed representations of the permission and record shapes.
//!
//! The source data is loosely shaped: `actions` is sometimes a string and
//! sometimes a list, `assigned_to` is sometimes a scalar ID and sometimes
//! an array. Those shapes are absorbed here, once, into tagged sum types;
//! nothing downstream branches on raw document shape.

use serde::{Deserialize, Serialize};

/// Well-known module names.
pub mod modules {
    pub const LEADS: &str = "leads";
    pub const TASKS: &str = "tasks";
    pub const LOGIN: &str = "login";
}

/// Document field paths used in filter construction.
pub mod fields {
    pub const CREATED_BY: &str = "created_by";
    pub const ASSIGNED_TO: &str = "assigned_to";
    pub const ASSIGN_REPORT_TO: &str = "assign_report_to";
    pub const SUBMODULE: &str = "submodule";
}

/// The module a permission entry applies to.
///
/// `"*"` and `"any"` both denote the wildcard selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleSelector {
    /// Applies to every module.
    Any,
    /// Applies to one named module.
    Named(String),
}

impl From<String> for ModuleSelector {
    fn from(value: String) -> Self {
        match value.as_str() {
            "*" | "any" => ModuleSelector::Any,
            _ => ModuleSelector::Named(value),
        }
    }
}

impl From<ModuleSelector> for String {
    fn from(value: ModuleSelector) -> Self {
        match value {
            ModuleSelector::Any => "*".to_string(),
            ModuleSelector::Named(name) => name,
        }
    }
}

impl ModuleSelector {
    /// Returns whether this selector covers `module`.
    pub fn matches(&self, module: &str) -> bool {
        match self {
            ModuleSelector::Any => true,
            ModuleSelector::Named(name) => name == module,
        }
    }
}

/// A single action token on a permission entry.
///
/// Unknown tokens are preserved as `Other` and never contribute a
/// capability; a permission list with unexpected entries is tolerated,
/// not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Basic view of owned/assigned records.
    Show,
    /// Cascading visibility over subordinates.
    Junior,
    /// Module-wide access (the `"all"` token).
    All,
    /// Module-wide access (the `"*"` token).
    Wildcard,
    /// Any other token.
    Other(String),
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        match value.as_str() {
            "show" => Action::Show,
            "junior" => Action::Junior,
            "all" => Action::All,
            "*" => Action::Wildcard,
            _ => Action::Other(value),
        }
    }
}

impl From<Action> for String {
    fn from(value: Action) -> Self {
        match value {
            Action::Show => "show".to_string(),
            Action::Junior => "junior".to_string(),
            Action::All => "all".to_string(),
            Action::Wildcard => "*".to_string(),
            Action::Other(token) => token,
        }
    }
}

/// The actions granted by a permission entry.
///
/// The distinction between the bare wildcard *string* and a *list*
/// containing a wildcard token is semantically significant: only the
/// former, paired with a wildcard module, denotes super-admin. The two
/// must not collapse into one representation during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionSet {
    /// A single token stored as a string (e.g. `"*"`, `"all"`, `"show"`).
    Single(Action),
    /// A list of tokens (e.g. `["show", "junior"]`).
    List(Vec<Action>),
}

impl ActionSet {
    /// Returns whether this is the bare wildcard string, as opposed to a
    /// list that happens to contain a wildcard token.
    pub fn is_full_wildcard(&self) -> bool {
        matches!(self, ActionSet::Single(Action::Wildcard))
    }

    /// Returns whether `action` is granted, either as the single token or
    /// as a member of the list.
    pub fn grants(&self, action: &Action) -> bool {
        match self {
            ActionSet::Single(granted) => granted == action,
            ActionSet::List(granted) => granted.contains(action),
        }
    }
}

/// One entry of a user's permission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub module: ModuleSelector,
    pub actions: ActionSet,
}

impl PermissionEntry {
    /// Creates an entry granting the listed actions on `module`.
    pub fn new(module: impl Into<String>, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            module: ModuleSelector::from(module.into()),
            actions: ActionSet::List(actions.into_iter().collect()),
        }
    }

    /// The super-admin entry: wildcard module, wildcard action string.
    pub fn super_admin() -> Self {
        Self {
            module: ModuleSelector::Any,
            actions: ActionSet::Single(Action::Wildcard),
        }
    }

    /// A module-admin entry with the wildcard action string.
    pub fn admin_of(module: impl Into<String>) -> Self {
        Self {
            module: ModuleSelector::from(module.into()),
            actions: ActionSet::Single(Action::Wildcard),
        }
    }
}

/// A role in the reporting hierarchy.
///
/// Roles form a forest: a role without a parent is a root. Subordinate
/// roles of R are the roles strictly below R, not R itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub parent_role_id: Option<String>,
    pub name: String,
}

impl Role {
    /// Creates a root role.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_role_id: None,
            name: name.into(),
        }
    }

    /// Creates a role reporting to `parent_role_id`.
    pub fn with_parent(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_role_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_role_id: Some(parent_role_id.into()),
            name: name.into(),
        }
    }
}

/// A directory user, attached to at most one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Creates an active user without a role.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role_id: None,
            department_id: None,
            is_active: true,
        }
    }

    /// Creates an active user attached to `role_id`.
    pub fn with_role(id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role_id: Some(role_id.into()),
            department_id: None,
            is_active: true,
        }
    }
}

/// The assignee field of a record.
///
/// Historical records store a single scalar ID; newer records store a
/// list to support multi-assignment. Both forms are permanent: every
/// consumer must handle both, and filter construction emits a clause for
/// each.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Assignees {
    /// No assignee stored (absent or null field).
    #[default]
    None,
    /// Scalar storage form.
    One(String),
    /// List storage form.
    Many(Vec<String>),
}

impl Assignees {
    /// Returns whether the record is wholly unassigned.
    ///
    /// An empty scalar counts: a cleared `assigned_to` historically left
    /// an empty string behind, and an empty string identifies nobody.
    pub fn is_unassigned(&self) -> bool {
        match self {
            Assignees::None => true,
            Assignees::One(id) => id.is_empty(),
            Assignees::Many(ids) => ids.is_empty(),
        }
    }

    /// Returns whether `user_id` is an assignee under either form.
    pub fn contains(&self, user_id: &str) -> bool {
        match self {
            Assignees::None => false,
            Assignees::One(id) => id == user_id,
            Assignees::Many(ids) => ids.iter().any(|id| id == user_id),
        }
    }

    /// The assignee IDs as a slice, regardless of storage form.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Assignees::None => &[],
            Assignees::One(id) => std::slice::from_ref(id),
            Assignees::Many(ids) => ids.as_slice(),
        }
    }

    /// Iterates the assignee IDs regardless of storage form.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.as_slice().iter().map(String::as_str)
    }
}

/// The ownership and module-context fields of a record.
///
/// These are the only record fields the engine reads; it never writes
/// them. Unknown document fields are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordOwnership {
    /// Creator, immutable after creation.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Assignee(s), in either historical storage form.
    #[serde(default)]
    pub assigned_to: Assignees,
    /// Users explicitly granted visibility without being assignees.
    #[serde(default)]
    pub assign_report_to: Vec<String>,
    /// Module-context override: when present, this record answers to the
    /// named sub-module's permissions (e.g. a lead moved into the login
    /// queue carries `"login"`).
    #[serde(default)]
    pub submodule: Option<String>,
}

impl RecordOwnership {
    /// Creates ownership fields with only a creator.
    pub fn created_by(user_id: impl Into<String>) -> Self {
        Self {
            created_by: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Sets the assignee field.
    pub fn with_assignees(mut self, assigned_to: Assignees) -> Self {
        self.assigned_to = assigned_to;
        self
    }

    /// Sets the explicit reporters.
    pub fn with_reporters(mut self, reporters: impl IntoIterator<Item = String>) -> Self {
        self.assign_report_to = reporters.into_iter().collect();
        self
    }

    /// Sets the module-context override.
    pub fn in_submodule(mut self, submodule: impl Into<String>) -> Self {
        self.submodule = Some(submodule.into());
        self
    }

    /// The module whose permissions govern this record: the submodule
    /// override when present, otherwise the module it was requested under.
    pub fn effective_module<'a>(&'a self, requested: &'a str) -> &'a str {
        self.submodule.as_deref().unwrap_or(requested)
    }
}
