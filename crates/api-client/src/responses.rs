use serde::Deserialize;
use serde_json::Value;

/// The body of a failed request: `{ "error": ... }`.
///
/// The server does not classify errors, so the payload is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Value,
}

impl ApiErrorResponse {
    /// The error as display text: strings as-is, anything else as compact JSON.
    pub fn message(&self) -> String {
        match &self.error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
