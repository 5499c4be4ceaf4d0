//! Payload construction errors.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("proposal has no choices")]
    NoChoices,

    #[error("voting window ends before it starts")]
    EmptyVotingWindow,

    #[error("serialization failed: {0}")]
    Serialization(String),
}
