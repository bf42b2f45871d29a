//! Errors surfaced by entity creation.
//!
//! Nothing here ever reaches a connected client; the session logs and drops.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    #[error("entity runtime ids exhausted")]
    IdsExhausted,

    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),
}
