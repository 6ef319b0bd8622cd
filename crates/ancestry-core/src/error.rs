//! Error taxonomy for ancestry queries.
//!
//! Absence of a result ("no common ancestor") is never an error; it is `None`.

use crate::key::KeyKind;
use std::path::PathBuf;

/// Errors surfaced by tree/graph construction and top-level queries.
#[derive(Debug, thiserror::Error)]
pub enum AncestryError {
    #[error("cannot compare {left} key with {right} key")]
    TypeMismatch { left: KeyKind, right: KeyKind },
    #[error("invalid fixture: {0}")]
    Fixture(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AncestryError>;
