//! Envelope builders for the governance actions hubcast submits.
//!
//! Everything here is a stateless transform: callers supply the
//! already-signed message fields and get back a
//! [`SubmissionRequest`](hubcast_types::SubmissionRequest). Nothing in
//! this crate touches key material — signatures are validated for shape
//! only, never produced.

pub mod envelope;
pub mod error;
pub mod proposal;
pub mod space;

pub use envelope::SignedEnvelope;
pub use error::PayloadError;
pub use proposal::{ProposalBody, ProposalParams, VotingType};
pub use space::{SpaceFilters, SpaceSettings, Strategy, ValidationRule, VotingSettings};
