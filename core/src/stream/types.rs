//! stream/types.rs
//! Session configuration, outcomes and stream-level errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::RecordEvent;
use crate::constants::{DEFAULT_BUFFER_INCREMENT, DEFAULT_MAX_LINE_BYTES, MAX_RECORD_BYTES};
use crate::memory::{Address, MemoryBuffer};
use crate::telemetry::RecordCounters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Upper bound on payload bytes per data record (1..=255).
    pub max_line_bytes: usize,
    pub line_ending: LineEnding,
    /// Emit a start-linear-address record before end-of-file.
    pub start_linear_address: Option<u32>,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            line_ending: LineEnding::CrLf,
            start_linear_address: None,
        }
    }
}

impl EncodeConfig {
    pub fn new(max_line_bytes: usize) -> Self {
        Self { max_line_bytes, ..Default::default() }
    }

    pub fn with_start_linear_address(mut self, eip: u32) -> Self {
        self.start_linear_address = Some(eip);
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_bytes == 0 {
            return Err(ConfigError::LineBytesZero);
        }
        if self.max_line_bytes > MAX_RECORD_BYTES {
            return Err(ConfigError::LineBytesTooLarge {
                have: self.max_line_bytes,
                max: MAX_RECORD_BYTES,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Growth step of the target memory image.
    pub buffer_increment: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { buffer_increment: DEFAULT_BUFFER_INCREMENT }
    }
}

impl DecodeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_increment == 0 {
            return Err(ConfigError::IncrementZero);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid max_line_bytes: zero")]
    LineBytesZero,
    #[error("invalid max_line_bytes: {have} > {max}")]
    LineBytesTooLarge { have: usize, max: usize },
    #[error("invalid buffer_increment: zero")]
    IncrementZero,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Image extends past what extended-linear-address records can reach.
    #[error("image end 0x{end:x} exceeds the 32-bit address space")]
    AddressOutOfRange { end: Address },
}

/// Result of feeding one line to a decode session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Record(RecordEvent),
    /// Empty after trimming.
    Blank,
    /// Arrived after the end-of-file record; not processed.
    AfterEof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// EOF reached, no format problems.
    Clean,
    /// EOF reached, at least one non-fatal problem.
    DecodedWithWarnings,
    /// Input ended before an end-of-file record.
    Incomplete,
}

/// Everything a finished decode session hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub image: MemoryBuffer,
    pub done: bool,
    pub happy: bool,
    pub start_linear_address: Option<u32>,
    pub start_segment_address: Option<(u16, u16)>,
    pub lines: usize,
    pub counters: RecordCounters,
}

impl DecodeReport {
    pub fn status(&self) -> DecodeStatus {
        match (self.done, self.happy) {
            (false, _) => DecodeStatus::Incomplete,
            (true, true) => DecodeStatus::Clean,
            (true, false) => DecodeStatus::DecodedWithWarnings,
        }
    }

    /// Done via EOF with no problem along the way.
    pub fn is_success(&self) -> bool {
        self.status() == DecodeStatus::Clean
    }
}
