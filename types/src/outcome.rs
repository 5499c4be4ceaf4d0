//! Result of one full submission run.

use crate::error::DeliveryError;
use crate::receipt::Receipt;

/// Definitive outcome of a full engine run across all endpoints and
/// attempts.
///
/// Per-endpoint failures are contained inside the engine; the caller only
/// ever sees success with a receipt, or exhaustion with the last error.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionOutcome {
    /// An endpoint accepted the request.
    Success(Receipt),
    /// Every endpoint failed on every attempt; holds the last error seen.
    Failure(DeliveryError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            Self::Success(receipt) => Some(receipt),
            Self::Failure(_) => None,
        }
    }

    /// Convert into a `Result` for `?`-style handling at the call site.
    pub fn into_result(self) -> Result<Receipt, DeliveryError> {
        match self {
            Self::Success(receipt) => Ok(receipt),
            Self::Failure(error) => Err(error),
        }
    }
}
