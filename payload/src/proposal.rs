//! Proposal message construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PayloadError;

/// Length of the default voting window (48 hours), in seconds.
pub const DEFAULT_VOTING_WINDOW_SECS: u64 = 48 * 3600;

/// Default choice set for a proposal.
pub const DEFAULT_CHOICES: [&str; 3] = ["Yes", "No", "Abstain"];

/// Voting system the hub should apply to the proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VotingType {
    SingleChoice,
    Weighted,
    Approval,
    Quadratic,
}

/// Free-text sections assembled into the proposal body, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalBody {
    pub abstract_text: String,
    pub background: String,
    pub additional: String,
}

impl ProposalBody {
    /// Join the non-empty sections with blank lines.
    pub fn render(&self) -> String {
        [
            self.abstract_text.as_str(),
            self.background.as_str(),
            self.additional.as_str(),
        ]
        .iter()
        .filter(|section| !section.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n")
    }
}

/// Parameters of a proposal message, in the hub's wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposalParams {
    /// Space the proposal belongs to.
    pub space: String,
    #[serde(rename = "type")]
    pub voting_type: VotingType,
    pub title: String,
    pub body: String,
    pub choices: Vec<String>,
    /// Voting window start (unix seconds).
    pub start: u64,
    /// Voting window end (unix seconds).
    pub end: u64,
    /// Block number the voting power snapshot is taken at.
    pub snapshot: u64,
    /// Chain id of the space's network.
    pub network: String,
    /// Plugin configuration, serialized as a JSON string per the hub's
    /// wire format.
    pub plugins: String,
    /// App tag recorded with the message.
    pub app: String,
}

impl ProposalParams {
    /// Build proposal params with the conventional defaults: weighted
    /// voting, Yes/No/Abstain choices, a 48 hour window.
    pub fn new(
        space: impl Into<String>,
        title: impl Into<String>,
        body: ProposalBody,
        start: u64,
        snapshot: u64,
        network: impl Into<String>,
        app: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            voting_type: VotingType::Weighted,
            title: title.into(),
            body: body.render(),
            choices: DEFAULT_CHOICES.iter().map(|c| c.to_string()).collect(),
            start,
            end: start + DEFAULT_VOTING_WINDOW_SECS,
            snapshot,
            network: network.into(),
            plugins: "{}".to_string(),
            app: app.into(),
        }
    }

    pub fn with_voting_type(mut self, voting_type: VotingType) -> Self {
        self.voting_type = voting_type;
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    /// Override the voting window end.
    pub fn with_end(mut self, end: u64) -> Self {
        self.end = end;
        self
    }

    /// Check the proposal invariants before it is signed and submitted.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.choices.is_empty() {
            return Err(PayloadError::NoChoices);
        }
        if self.end <= self.start {
            return Err(PayloadError::EmptyVotingWindow);
        }
        Ok(())
    }

    /// The typed message body for an envelope's `data` field.
    pub fn to_message(&self) -> Result<Value, PayloadError> {
        self.validate()?;
        serde_json::to_value(self).map_err(|e| PayloadError::Serialization(e.to_string()))
    }
}
