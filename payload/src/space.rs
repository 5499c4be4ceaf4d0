//! Space settings message construction.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::PayloadError;

/// On-hub configuration of a governance space.
///
/// Field names follow the hub's camelCase wire format so a settings file
/// can be round-tripped through this type unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSettings {
    pub name: String,
    #[serde(default)]
    pub about: String,
    pub network: String,
    pub symbol: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default)]
    pub moderators: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default = "empty_object")]
    pub plugins: Value,
    #[serde(default)]
    pub children: Vec<String>,
    pub voting: VotingSettings,
    pub strategies: Vec<Strategy>,
    #[serde(default)]
    pub validation: ValidationRule,
    #[serde(default)]
    pub vote_validation: ValidationRule,
    #[serde(default)]
    pub filters: SpaceFilters,
    #[serde(default)]
    pub treasuries: Vec<Value>,
}

/// Voting configuration of a space.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingSettings {
    pub quorum: u64,
    #[serde(default)]
    pub hide_abstain: bool,
}

/// A named voting-power strategy with its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub network: String,
    pub params: Value,
}

/// A named validation rule ("any" unless the space restricts it).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub name: String,
    #[serde(default = "empty_object")]
    pub params: Value,
}

impl Default for ValidationRule {
    fn default() -> Self {
        Self {
            name: "any".to_string(),
            params: empty_object(),
        }
    }
}

/// Participation filters of a space.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceFilters {
    #[serde(default)]
    pub min_score: u64,
    #[serde(default)]
    pub only_members: bool,
}

fn empty_object() -> Value {
    json!({})
}

impl SpaceSettings {
    pub fn with_quorum(mut self, quorum: u64) -> Self {
        self.voting.quorum = quorum;
        self
    }

    /// The typed message body for a space-update envelope.
    ///
    /// The hub expects the settings as an embedded JSON string, not a
    /// nested object.
    pub fn to_message(&self, space: &str) -> Result<Value, PayloadError> {
        let settings =
            serde_json::to_string(self).map_err(|e| PayloadError::Serialization(e.to_string()))?;
        Ok(json!({
            "space": space,
            "settings": settings,
        }))
    }
}
