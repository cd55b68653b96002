//! Actions and the namespaced action-type wire format.
//!
//! An action type owned by a module is written as `"<path>/<local>"`.
//! Code outside the module only ever sees the namespaced form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between a namespace path and a local action type.
pub const NAMESPACE_SEPARATOR: char = '/';

/// A dispatched action: a type string plus arbitrary extra fields.
///
/// Serializes as a flat JSON object, `{"type": "...", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Map::new(),
        }
    }

    /// Adds (or replaces) a field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Same action with a different type; every other field is kept.
    pub fn with_kind(&self, kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: self.fields.clone(),
        }
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Builds `"<path>/<local>"`.
pub fn namespaced_type(path: &str, local: &str) -> String {
    format!("{}{}{}", path, NAMESPACE_SEPARATOR, local)
}

/// Returns the local part of `kind` if it lives under `path`.
///
/// `local_type("counter", "counter/INC")` is `Some("INC")`, while
/// `"counterX/INC"` and `"counter"` do not belong to `counter`.
pub fn local_type<'a>(path: &str, kind: &'a str) -> Option<&'a str> {
    kind.strip_prefix(path)?.strip_prefix(NAMESPACE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_type_beside_fields() {
        let action = Action::new("counter/ADD").with("amount", 3);
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value, json!({"type": "counter/ADD", "amount": 3}));

        let back: Action = serde_json::from_value(value).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn local_type_requires_separator() {
        assert_eq!(local_type("counter", "counter/INC"), Some("INC"));
        assert_eq!(local_type("counter", "counterX/INC"), None);
        assert_eq!(local_type("counter", "counter"), None);
        assert_eq!(local_type("counter", "other/INC"), None);
    }

    #[test]
    fn nested_paths_strip_only_their_prefix() {
        assert_eq!(
            local_type("app/counter", "app/counter/INC"),
            Some("INC")
        );
        assert_eq!(local_type("app", "app/counter/INC"), Some("counter/INC"));
    }

    #[test]
    fn with_kind_keeps_fields() {
        let action = Action::new("INC").with("by", 2);
        let renamed = action.with_kind("counter/INC");
        assert_eq!(renamed.kind, "counter/INC");
        assert_eq!(renamed.get("by"), Some(&json!(2)));
    }
}
