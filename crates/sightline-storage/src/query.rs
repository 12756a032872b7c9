//! Lowering filter expressions into document-store queries.
//!
//! `to_query` renders a `FilterExpression` as a MongoDB-style query
//! document; `matches` evaluates the same semantics directly against an
//! in-memory JSON document. The two must agree: `MemoryRecordStore` runs
//! `matches`, external document stores consume `to_query`.
//!
//! Scalar operators (`Eq`, `In`) only match scalar fields and array
//! operators (`Has`, `HasAny`) only match array fields. A field whose
//! shape does not fit the predicate simply does not match, which is
//! the deny direction.

use serde_json::{json, Map, Value};

use sightline_domain::filter::FilterExpression;
use sightline_domain::model::fields;

/// Renders a filter as a document-store query.
pub fn to_query(filter: &FilterExpression) -> Value {
    match filter {
        FilterExpression::All => json!({}),
        // No record lacks its primary key; this is the conventional
        // zero-result query for stores without a native "false".
        FilterExpression::None => json!({ "_id": { "$exists": false } }),
        FilterExpression::Eq { field, value } => doc(field, json!(value)),
        FilterExpression::In { field, values } => doc(field, json!({ "$in": values })),
        FilterExpression::Has { field, value } => {
            doc(field, json!({ "$elemMatch": { "$eq": value } }))
        }
        FilterExpression::HasAny { field, values } => {
            doc(field, json!({ "$elemMatch": { "$in": values } }))
        }
        FilterExpression::Unassigned => json!({
            "$or": [
                doc(fields::ASSIGNED_TO, json!({ "$exists": false })),
                doc(fields::ASSIGNED_TO, Value::Null),
                doc(fields::ASSIGNED_TO, json!({ "$size": 0 })),
                doc(fields::ASSIGNED_TO, json!("")),
            ]
        }),
        FilterExpression::And { children } => {
            json!({ "$and": children.iter().map(to_query).collect::<Vec<_>>() })
        }
        FilterExpression::Or { children } => {
            json!({ "$or": children.iter().map(to_query).collect::<Vec<_>>() })
        }
    }
}

/// Evaluates a filter against a JSON document.
pub fn matches(filter: &FilterExpression, document: &Value) -> bool {
    match filter {
        FilterExpression::All => true,
        FilterExpression::None => false,
        FilterExpression::Eq { field, value } => {
            scalar(document, field) == Some(value.as_str())
        }
        FilterExpression::In { field, values } => scalar(document, field)
            .is_some_and(|found| values.iter().any(|candidate| candidate == found)),
        FilterExpression::Has { field, value } => {
            array(document, field).is_some_and(|items| items.iter().any(|item| item == value))
        }
        FilterExpression::HasAny { field, values } => array(document, field).is_some_and(|items| {
            items
                .iter()
                .any(|item| values.iter().any(|candidate| candidate == item))
        }),
        FilterExpression::Unassigned => is_unassigned(document),
        FilterExpression::And { children } => {
            children.iter().all(|child| matches(child, document))
        }
        FilterExpression::Or { children } => {
            children.iter().any(|child| matches(child, document))
        }
    }
}

/// A single object document wrapping `field`.
fn doc(field: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

/// The field as a scalar string, if it is stored as one.
fn scalar<'a>(document: &'a Value, field: &str) -> Option<&'a str> {
    document.get(field).and_then(Value::as_str)
}

/// The field's string elements, if it is stored as an array.
fn array<'a>(document: &'a Value, field: &str) -> Option<Vec<&'a str>> {
    document
        .get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
}

/// Unassigned means: field absent, null, an empty array, or an empty
/// scalar. Either storage form with nobody in it counts.
fn is_unassigned(document: &Value) -> bool {
    match document.get(fields::ASSIGNED_TO) {
        None | Some(Value::Null) => true,
        Some(Value::String(id)) => id.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
