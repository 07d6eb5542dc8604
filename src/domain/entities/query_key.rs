use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

/// Cache address of a read: `(operation, params?)`.
///
/// Params are compared by their canonical JSON text, so object field order
/// never splits one logical query into two entries.
#[derive(Debug, Clone)]
pub struct QueryKey {
    operation: Arc<str>,
    params: Option<Value>,
    canonical: Arc<str>,
}

impl QueryKey {
    pub fn new(operation: impl AsRef<str>) -> Self {
        Self::build(operation.as_ref(), None)
    }

    pub fn with_params(operation: impl AsRef<str>, params: Value) -> Self {
        Self::build(operation.as_ref(), Some(params))
    }

    fn build(operation: &str, params: Option<Value>) -> Self {
        let canonical = params
            .as_ref()
            .map(canonical_json)
            .unwrap_or_default();
        Self {
            operation: Arc::from(operation),
            params,
            canonical: Arc::from(canonical.as_str()),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    pub(crate) fn operation_arc(&self) -> Arc<str> {
        self.operation.clone()
    }
}

impl PartialEq for QueryKey {
    fn eq(&self, other: &Self) -> bool {
        self.operation == other.operation && self.canonical == other.canonical
    }
}

impl Eq for QueryKey {}

impl Hash for QueryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.operation.hash(state);
        self.canonical.hash(state);
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.canonical.is_empty() {
            write!(f, "{}", self.operation)
        } else {
            write!(f, "{}({})", self.operation, self.canonical)
        }
    }
}

/// JSON text with object keys sorted at every depth.
fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<_> = map.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            let body: Vec<String> = fields
                .into_iter()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), canonical_json(v)))
                .collect();
            format!("{{{}}}", body.join(","))
        }
        Value::Array(items) => {
            let body: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", body.join(","))
        }
        other => other.to_string(),
    }
}
