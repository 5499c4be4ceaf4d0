//! Shared utilities for hubcast.

pub mod logging;

pub use logging::init_tracing;
