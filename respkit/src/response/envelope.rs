//! The `{code, message, data}` wire envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default messages shared by every response path.
pub mod messages {
    /// Message for successful responses.
    pub const SUCCESS: &str = "Success";
    /// Prefix for invalid-parameter responses.
    pub const INVALID_PARAMS: &str = "Invalid parameters in request";
    /// Prefix for unauthorized responses.
    pub const UNAUTHORIZED: &str = "Unauthorized";
    /// Message used when the payload itself cannot be rendered.
    pub const INTERNAL_ERROR: &str = "Internal Server Error";
}

/// Envelope `code` for success on the generic path.
pub const SUCCESS_CODE: i32 = 0;

/// Envelope `code` for success on the structured-result path.
pub const STRUCTURED_SUCCESS_CODE: i32 = 200;

/// Envelope `code` substituted when an error carries no explicit code.
pub const INTERNAL_ERROR_CODE: i32 = 500;

/// Uniform JSON body written by every formatter.
///
/// `data` is tri-state on the wire: `None` omits the key, `Some(Value::Null)`
/// writes `"data": null`, anything else writes the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Status or error classifier read by clients.
    pub code: i32,
    /// Human-readable outcome.
    pub message: String,
    /// Payload, when the envelope carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Success envelope. The `data` key is always written, as `null` when
    /// there is no payload.
    #[must_use]
    pub fn success(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failure envelope. The `data` key is written only for a non-null payload.
    #[must_use]
    pub fn failure(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data).filter(|value| !value.is_null()),
        }
    }
}
