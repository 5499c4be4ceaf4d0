//! Nullable infrastructure for deterministic testing.
//!
//! The external dependency of the submission engine — the hub — is
//! abstracted behind the [`Delivery`](hubcast_types::Delivery) trait. This
//! crate provides a test-friendly implementation that:
//! - Returns scripted outcomes instead of touching the network
//! - Records every call for assertions
//! - Can be controlled programmatically
//!
//! Usage: swap the real hub client for [`NullHub`] in tests.

pub mod hub;

pub use hub::{NullHub, RecordedCall};
