//! Turns a settled response into a tagged outcome

use serde_json::Value;

use crate::application::errors::value_text;
use crate::domain::entities::{is_truthy, Outcome, ResponseEnvelope};

/// Classify `envelope` for an operation whose success flag is `success_flag`.
///
/// Checked in order: truthy success flag, truthy `error`, anything else.
pub fn classify(envelope: &ResponseEnvelope, success_flag: &str) -> Outcome {
    if envelope.field(success_flag).is_some_and(is_truthy) {
        return Outcome::Success {
            payload: envelope.data.clone(),
        };
    }

    if let Some(error) = envelope.field("error").filter(|e| is_truthy(e)) {
        return Outcome::SoftError {
            message: soft_error_message(error),
        };
    }

    Outcome::Unrecognized {
        raw: envelope.data.clone(),
    }
}

/// Message of a business error: `response.data.message`, then `message`,
/// then the value itself. A bare flag such as `true` or `1` carries no text
/// and yields an empty message, which the dispatcher replaces with its fallback.
pub fn soft_error_message(error: &Value) -> String {
    let message = error
        .pointer("/response/data/message")
        .or_else(|| error.get("message"))
        .filter(|m| is_truthy(m))
        .unwrap_or(error);

    match message {
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Bool(_) | Value::Number(_) | Value::Null => String::new(),
        other => value_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_flag_wins_over_error() {
        let env = ResponseEnvelope::ok(json!({ "approvedListing": true, "error": "ignored" }));
        assert!(classify(&env, "approvedListing").is_success());
    }

    #[test]
    fn test_falsy_flag_falls_through() {
        let env = ResponseEnvelope::ok(json!({ "approvedListing": false, "error": "Listing is locked" }));
        assert_eq!(
            classify(&env, "approvedListing"),
            Outcome::SoftError {
                message: "Listing is locked".to_string()
            }
        );
    }

    #[test]
    fn test_unrecognized() {
        let env = ResponseEnvelope::ok(json!({ "status": "queued" }));
        assert_eq!(
            classify(&env, "approvedListing"),
            Outcome::Unrecognized {
                raw: json!({ "status": "queued" })
            }
        );

        let empty = ResponseEnvelope::ok(json!(null));
        assert!(matches!(classify(&empty, "approvedListing"), Outcome::Unrecognized { .. }));
    }

    #[test]
    fn test_soft_error_message_sources() {
        assert_eq!(
            soft_error_message(&json!({ "response": { "data": { "message": "nested" } }, "message": "outer" })),
            "nested"
        );
        assert_eq!(soft_error_message(&json!({ "message": "outer" })), "outer");
        assert_eq!(soft_error_message(&json!({ "message": ["a", "b"] })), "a, b");
        assert_eq!(soft_error_message(&json!("plain")), "plain");
        assert_eq!(soft_error_message(&json!({ "code": 7 })), r#"{"code":7}"#);
        assert_eq!(soft_error_message(&json!(true)), "");
        assert_eq!(soft_error_message(&json!(42)), "");
    }
}
