//! Resilient submission engine.
//!
//! Delivers a signed submission to an ordered list of hub endpoints:
//! strict priority failover within an attempt cycle, exponential backoff
//! between cycles, bounded total attempts. At most one delivery is in
//! flight at any time — the payload carries no idempotency key, and a
//! speculative parallel delivery could be accepted twice.

pub mod engine;

pub use engine::SubmissionEngine;
