//! Common types shared across Herodex crates.
//!
//! This crate provides the error taxonomy and the character types that
//! flow between the upstream client and the catalog service.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Character, CharacterRecord};
