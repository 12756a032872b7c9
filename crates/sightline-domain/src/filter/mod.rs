//! Composable filter expressions describing record visibility.
//!
//! A filter is a tagged predicate tree, not a store-specific query
//! fragment: the engine builds the tree, and whatever record store the
//! caller uses translates it into its own query language (or evaluates it
//! in-process). `FilterExpression::None` is the explicit deny sentinel:
//! a store may translate it into an impossible condition, but inside the
//! engine "matches nothing" is a first-class value, never a magic
//! document.

use serde::{Deserialize, Serialize};

/// A composable predicate over record documents.
///
/// Scalar and array operators are deliberately distinct (`Eq`/`In` versus
/// `Has`/`HasAny`): the assignee field exists in both storage forms, and
/// a clause for one form must never silently stand in for the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FilterExpression {
    /// Matches every record.
    All,
    /// Matches no record.
    None,
    /// Scalar field equals a value.
    Eq { field: String, value: String },
    /// Scalar field is one of the given values.
    In { field: String, values: Vec<String> },
    /// Array field contains a value.
    Has { field: String, value: String },
    /// Array field shares at least one element with the given values.
    HasAny { field: String, values: Vec<String> },
    /// The assignee field is missing, null, or empty in either storage
    /// form.
    Unassigned,
    /// Every child matches.
    And { children: Vec<FilterExpression> },
    /// At least one child matches.
    Or { children: Vec<FilterExpression> },
}

impl FilterExpression {
    /// Scalar equality on `field`.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterExpression::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Scalar membership: `field` is one of `values`.
    pub fn is_in(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        FilterExpression::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Array containment: `field` contains `value`.
    pub fn has(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterExpression::Has {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Array intersection: `field` shares an element with `values`.
    pub fn has_any(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        FilterExpression::HasAny {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Conjunction with simplification: `All` children are dropped, any
    /// `None` child collapses the whole expression to `None`, and nested
    /// `And`s are flattened.
    pub fn and(children: impl IntoIterator<Item = FilterExpression>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                FilterExpression::All => {}
                FilterExpression::None => return FilterExpression::None,
                FilterExpression::And { children } => flat.extend(children),
                other => flat.push(other),
            }
        }
        if flat.is_empty() {
            return FilterExpression::All;
        }
        if flat.len() == 1 {
            return flat.swap_remove(0);
        }
        FilterExpression::And { children: flat }
    }

    /// Disjunction with simplification: `None` children are dropped, any
    /// `All` child collapses the whole expression to `All`, and nested
    /// `Or`s are flattened.
    pub fn or(children: impl IntoIterator<Item = FilterExpression>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                FilterExpression::None => {}
                FilterExpression::All => return FilterExpression::All,
                FilterExpression::Or { children } => flat.extend(children),
                other => flat.push(other),
            }
        }
        if flat.is_empty() {
            return FilterExpression::None;
        }
        if flat.len() == 1 {
            return flat.swap_remove(0);
        }
        FilterExpression::Or { children: flat }
    }

    /// Returns whether this filter can match no record at all.
    pub fn matches_nothing(&self) -> bool {
        matches!(self, FilterExpression::None)
    }
}
