//! Hub acknowledgment returned on successful submission.

use serde::{Deserialize, Serialize};

/// Acknowledgment from the endpoint that accepted a submission.
///
/// The submission engine treats this as opaque; the fields exist so the
/// CLI can hand a machine-parseable ack to a calling orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hub-assigned identifier of the accepted message.
    pub id: String,
    /// Content address of the archived message, if the hub reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs: Option<String>,
    /// Relayer acknowledgment, if the hub relayed the message on-chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relayer: Option<RelayerAck>,
}

/// On-chain relay acknowledgment embedded in a receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayerAck {
    /// Address of the relaying account.
    pub address: String,
    /// Relayer's own acknowledgment token.
    pub receipt: String,
}

impl Receipt {
    /// A receipt carrying only an id. Mostly useful in tests.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ipfs: None,
            relayer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_receipt_deserializes() {
        let json = r#"{
            "id": "0x1ff2",
            "ipfs": "bafkreia",
            "relayer": {"address": "0xdead", "receipt": "0xbeef"}
        }"#;
        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.id, "0x1ff2");
        assert_eq!(receipt.ipfs.as_deref(), Some("bafkreia"));
        assert_eq!(receipt.relayer.unwrap().address, "0xdead");
    }

    #[test]
    fn minimal_receipt_deserializes() {
        let receipt: Receipt = serde_json::from_str(r#"{"id": "0x1"}"#).unwrap();
        assert_eq!(receipt.id, "0x1");
        assert_eq!(receipt.ipfs, None);
        assert_eq!(receipt.relayer, None);
    }

    #[test]
    fn minimal_receipt_serializes_without_null_fields() {
        let out = serde_json::to_string(&Receipt::with_id("0x1")).unwrap();
        assert_eq!(out, r#"{"id":"0x1"}"#);
    }
}
