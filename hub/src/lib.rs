//! Hub transport — single-endpoint delivery over HTTP.

pub mod client;

pub use client::HubClient;
