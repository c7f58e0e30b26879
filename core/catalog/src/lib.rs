//! Herodex catalog service.
//!
//! This crate holds the incremental synchronization core: an
//! atomically-swappable cache of (identifier index, watermark) pairs and
//! the coordinator that fetches upstream changes, merges them into the
//! index and advances the watermark.

pub mod cache;
pub mod service;

pub use cache::{CacheSnapshot, InMemoryCache, SnapshotCache};
pub use service::CatalogService;
