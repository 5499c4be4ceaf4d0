//! Signed envelope — the opaque payload the engine delivers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hubcast_types::SubmissionRequest;

use crate::error::PayloadError;

/// A pre-signed message envelope in the hub's wire format.
///
/// `sig` is produced elsewhere (key custody is out of scope); this type
/// only checks its shape and assembles the JSON body the hub expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// Account that authorized the message.
    pub address: String,
    /// 0x-prefixed hex signature over the typed message.
    pub sig: String,
    /// The typed message body.
    pub data: Value,
}

impl SignedEnvelope {
    pub fn new(
        address: impl Into<String>,
        sig: impl Into<String>,
        data: Value,
    ) -> Result<Self, PayloadError> {
        let address = address.into();
        let sig = sig.into();
        validate_address(&address)?;
        validate_signature(&sig)?;
        Ok(Self { address, sig, data })
    }

    /// Bind the envelope to its destination space as a submission request.
    pub fn into_request(
        self,
        destination: impl Into<String>,
    ) -> Result<SubmissionRequest, PayloadError> {
        let payload =
            serde_json::to_value(&self).map_err(|e| PayloadError::Serialization(e.to_string()))?;
        Ok(SubmissionRequest::new(destination, payload))
    }
}

/// Check that an address looks like a 20-byte 0x-hex account.
fn validate_address(address: &str) -> Result<(), PayloadError> {
    let hex_part = address
        .strip_prefix("0x")
        .ok_or_else(|| PayloadError::InvalidAddress("missing 0x prefix".to_string()))?;
    let bytes =
        hex::decode(hex_part).map_err(|e| PayloadError::InvalidAddress(e.to_string()))?;
    if bytes.len() != 20 {
        return Err(PayloadError::InvalidAddress(format!(
            "expected 20 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}

/// Check that a signature is 0x-prefixed hex of a 65-byte ECDSA signature.
fn validate_signature(sig: &str) -> Result<(), PayloadError> {
    let hex_part = sig
        .strip_prefix("0x")
        .ok_or_else(|| PayloadError::InvalidSignature("missing 0x prefix".to_string()))?;
    let bytes =
        hex::decode(hex_part).map_err(|e| PayloadError::InvalidSignature(e.to_string()))?;
    if bytes.len() != 65 {
        return Err(PayloadError::InvalidSignature(format!(
            "expected 65 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}
