//! Submission request — opaque signed payload plus routing metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully-formed, signed submission bound for the hub.
///
/// The payload is already signed and authorized; the submission machinery
/// never inspects or mutates it, so every retry resends byte-identical
/// data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Target resource on the hub (a space id such as `gov.example.eth`).
    destination: String,
    /// Signed envelope, opaque to the submission machinery.
    payload: Value,
}

impl SubmissionRequest {
    pub fn new(destination: impl Into<String>, payload: Value) -> Self {
        Self {
            destination: destination.into(),
            payload,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_return_constructed_values() {
        let request = SubmissionRequest::new("gov.example.eth", json!({"sig": "0xabc"}));
        assert_eq!(request.destination(), "gov.example.eth");
        assert_eq!(request.payload()["sig"], "0xabc");
    }
}
