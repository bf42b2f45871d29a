//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("buffer too short: need {needed} more bytes, have {remaining}")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("VarInt encoding error: {0}")]
    VarInt(#[from] crate::types::VarIntError),

    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    #[error("unsupported Java metadata type {type_id} at index {index}")]
    UnsupportedMetadataType { index: u8, type_id: u32 },

    #[error("Java metadata list is missing its 0xFF terminator")]
    MissingTerminator,
}
