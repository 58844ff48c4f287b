use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureKeyError {
    #[error("unknown feature key '{0}'")]
    Unknown(String),
}

/// Error payload the prediction service attaches to failed requests.
///
/// Every field is optional on the wire and `error` is not always a string; a
/// body without a usable message is treated the same as no body at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(Value::String(message.into())),
        }
    }

    /// Strings, numbers and booleans render as text. Null, blank strings and
    /// structured values carry no message.
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_error_messages_are_not_usable() {
        assert_eq!(
            ErrorBody::new("model unavailable").message().as_deref(),
            Some("model unavailable")
        );
        assert_eq!(ErrorBody::new("  ").message(), None);
        assert_eq!(ErrorBody::default().message(), None);
    }

    #[test]
    fn tolerates_bodies_without_error_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"nope"}"#).expect("parse");
        assert_eq!(body.message(), None);
    }

    #[test]
    fn scalar_error_values_render_as_text() {
        let numeric: ErrorBody = serde_json::from_str(r#"{"error":503}"#).expect("parse");
        assert_eq!(numeric.message().as_deref(), Some("503"));

        let flag: ErrorBody = serde_json::from_str(r#"{"error":false}"#).expect("parse");
        assert_eq!(flag.message().as_deref(), Some("false"));

        for raw in [r#"{"error":null}"#, r#"{"error":{"code":7}}"#, r#"{"error":[]}"#] {
            let body: ErrorBody = serde_json::from_str(raw).expect("parse");
            assert_eq!(body.message(), None, "body {raw}");
        }
    }
}
