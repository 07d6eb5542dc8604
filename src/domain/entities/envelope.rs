use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A settled response from the remote API: status code and JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub data: Value,
}

impl ResponseEnvelope {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    pub fn ok(data: Value) -> Self {
        Self::new(200, data)
    }

    /// Field of the body, if the body is an object carrying it.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Classified outcome of a successful transport response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The expected success flag was present and truthy
    Success { payload: Value },
    /// The body carried a business-level `error`
    SoftError { message: String },
    /// Neither shape matched
    Unrecognized { raw: Value },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
