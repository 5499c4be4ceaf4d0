//! Error types shared across the workspace.

use thiserror::Error;

/// A single endpoint delivery failed.
///
/// Every variant is retry-eligible inside the submission engine; the
/// distinction exists for diagnostics and for callers that want to layer
/// their own policy over the delivery seam.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("hub rejected the submission: {0}")]
    Rejected(String),

    #[error("invalid response from hub: {0}")]
    InvalidResponse(String),
}

/// A retry policy violates its invariants.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("backoff_multiplier must be at least 1")]
    ZeroMultiplier,
}
