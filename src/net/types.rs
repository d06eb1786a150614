//! Wire DTOs for the live channel.
//!
//! DESIGN
//! ======
//! The server and client exchange JSON event envelopes: a name, an optional
//! client-generated reference, and a free-form payload. Payloads stay
//! `serde_json::Value` so dispatch code remains schema-driven and new events
//! do not require lockstep deploys.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-to-client event carrying a pending charge token.
pub const CONFIRM_PAYMENT: &str = "confirm_payment";

/// Client-to-server event reporting a failed confirmation attempt.
pub const PAYMENT_ERROR: &str = "payment_error";

/// Client-to-server event reporting a successful confirmation.
pub const PAYMENT_SUCCESS: &str = "payment_success";

/// A single message on the live channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Client-generated reference (UUID string). Server-initiated events
    /// may omit it.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Event name, e.g. `"confirm_payment"`.
    pub event: String,
    /// Free-form event payload.
    #[serde(default)]
    pub payload: Value,
}

impl Event {
    /// Build a client-originated event with a fresh reference.
    pub fn request(event: &str, payload: Value) -> Self {
        Self {
            reference: Some(uuid::Uuid::new_v4().to_string()),
            event: event.to_owned(),
            payload,
        }
    }

    /// Extract the charge token from a `confirm_payment` event payload.
    pub fn client_secret(&self) -> Option<&str> {
        self.payload.get("client_secret").and_then(Value::as_str)
    }
}

/// Outcome of one confirmation attempt, reported to the server exactly once
/// per server-issued token.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmationOutcome {
    /// The processor confirmed the charge; the charge record is forwarded
    /// verbatim.
    Success { payment_intent: Value },
    /// The attempt failed locally or was refused by the processor.
    Failure { error: String },
}

impl ConfirmationOutcome {
    /// Convert the outcome into its outbound event.
    pub fn into_event(self) -> Event {
        match self {
            Self::Success { payment_intent } => Event::request(
                PAYMENT_SUCCESS,
                serde_json::json!({ "payment_intent": payment_intent }),
            ),
            Self::Failure { error } => {
                Event::request(PAYMENT_ERROR, serde_json::json!({ "error": error }))
            }
        }
    }
}
