//! autoab-common — Shared types and errors used across all autoab crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{BiomarkerAssociation, Entry, EntryPage, Pagination};
pub use error::{AutoabError, Result};
