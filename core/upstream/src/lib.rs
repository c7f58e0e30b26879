//! Upstream catalog client for Herodex.
//!
//! This crate talks to the remote character catalog: paginated batch
//! retrieval with concurrent fan-out for trailing pages, and single-entity
//! lookup. The `Fetcher` trait abstracts the upstream so the catalog
//! service can be tested without a network.

pub mod auth;
pub mod client;
pub mod fetcher;
pub mod models;

pub use client::{ApiClient, UpstreamConfig};
pub use fetcher::Fetcher;
