use std::io;

use thiserror::Error;

use crate::memory::BufferError;
use crate::record::RecordError;
use crate::stream::types::{ConfigError, EncodeError};

/// Unified error covering I/O, record, buffer, encoder and config failures.
/// - `#[from]` impls enable `?` across the I/O layer.
/// - `Io`, `Config` and `Encode` are fatal. Record and buffer kinds are
///   only surfaced for callers that want a hard failure.
#[derive(Debug, Error)]
pub enum HexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("record error: {0}")]
    Record(#[from] RecordError),

    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl HexError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, HexError::Io(_) | HexError::Config(_) | HexError::Encode(_))
    }
}
