//! Field-level comparison of two dataset documents.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

/// One leaf that differs between the published and the fresh snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    /// Dotted path, e.g. `rates.DE.standard`.
    pub path: String,
    /// Published value (`null` when absent).
    pub old: Value,
    /// Fresh value (`null` when absent).
    pub new: Value,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ~ {}: {} → {}", self.path, self.old, self.new)
    }
}

/// Compare the `rates` objects of two documents.
///
/// Objects present on both sides are compared key by key in sorted order;
/// anything else is compared as a whole. A missing key and `null` are the
/// same. Version, source and url are not compared.
pub fn compute_diff(old: &Value, new: &Value) -> Vec<FieldChange> {
    let empty = Value::Object(Map::new());
    let mut changes = Vec::new();
    diff_value(
        old.get("rates").unwrap_or(&empty),
        new.get("rates").unwrap_or(&empty),
        "rates",
        &mut changes,
    );
    changes
}

/// Read the published document at `path` as loose JSON.
///
/// A missing or unreadable file counts as an empty document, so every
/// fresh rate shows up as a change.
pub fn read_previous(path: &Path) -> Value {
    let empty = Value::Object(Map::new());
    if !path.exists() {
        return empty;
    }
    match std::fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not parse existing file");
            empty
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read existing file");
            empty
        }
    }
}

fn diff_value(old: &Value, new: &Value, path: &str, out: &mut Vec<FieldChange>) {
    match (old, new) {
        (Value::Object(o), Value::Object(n)) => {
            let keys: BTreeSet<&String> = o.keys().chain(n.keys()).collect();
            for key in keys {
                diff_value(
                    o.get(key).unwrap_or(&Value::Null),
                    n.get(key).unwrap_or(&Value::Null),
                    &format!("{path}.{key}"),
                    out,
                );
            }
        }
        _ if old != new => out.push(FieldChange {
            path: path.to_string(),
            old: old.clone(),
            new: new.clone(),
        }),
        _ => {}
    }
}
