//! record/types.rs
//! Record type registry, decoded record fields and per-record errors.
//!
//! Notes:
//! - `record_type` stays raw in `DecodedRecord` so unknown types survive
//!   decoding and can be reported by the session.
//! - Every error carries the 1-based line number it was found on.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

use crate::constants::record_ids;
use crate::utils::enum_name_or_hex;

/// Intel HEX record types (I8HEX/I16HEX/I32HEX).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum RecordType {
    Data                   = record_ids::DATA,
    EndOfFile              = record_ids::END_OF_FILE,
    ExtendedSegmentAddress = record_ids::EXTENDED_SEGMENT_ADDRESS,
    StartSegmentAddress    = record_ids::START_SEGMENT_ADDRESS,
    ExtendedLinearAddress  = record_ids::EXTENDED_LINEAR_ADDRESS,
    StartLinearAddress     = record_ids::START_LINEAR_ADDRESS,
}

impl RecordType {
    pub fn verify(raw: u8, line: usize) -> Result<Self, RecordError> {
        Self::try_from_primitive(raw).map_err(|_| RecordError::UnknownRecordType { raw, line })
    }

    /// Fixed payload length for address/start records; `None` when any
    /// length is accepted.
    pub const fn expected_payload_len(self) -> Option<usize> {
        match self {
            RecordType::ExtendedSegmentAddress | RecordType::ExtendedLinearAddress => Some(2),
            RecordType::StartSegmentAddress | RecordType::StartLinearAddress => Some(4),
            RecordType::Data | RecordType::EndOfFile => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RecordType::Data => "data",
            RecordType::EndOfFile => "end-of-file",
            RecordType::ExtendedSegmentAddress => "extended-segment-address",
            RecordType::StartSegmentAddress => "start-segment-address",
            RecordType::ExtendedLinearAddress => "extended-linear-address",
            RecordType::StartLinearAddress => "start-linear-address",
        }
    }
}

/// Fields of one decoded line, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub byte_count: u8,
    pub address_low16: u16,
    /// Raw type byte; see `kind()`.
    pub record_type: u8,
    pub payload: Vec<u8>,
    /// Checksum byte as found on the line.
    pub checksum: u8,
    /// Checksum byte that would make the record sum to zero.
    pub expected_checksum: u8,
    pub checksum_ok: bool,
    /// 1-based line number the record was read from.
    pub line: usize,
}

impl DecodedRecord {
    pub fn kind(&self) -> Result<RecordType, RecordError> {
        RecordType::verify(self.record_type, self.line)
    }

    /// Map a failed checksum to `RecordError::ChecksumMismatch`.
    pub fn verify(&self) -> Result<(), RecordError> {
        if self.checksum_ok {
            return Ok(());
        }
        Err(RecordError::ChecksumMismatch {
            line: self.line,
            expected: self.expected_checksum,
            found: self.checksum,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// No ':' on the line.
    #[error("discarding malformed record on line {line}")]
    MalformedRecord { line: usize },

    #[error("invalid hex digit {digit:?} at line {line}, column {column}")]
    InvalidHexDigit { digit: char, line: usize, column: usize },

    /// Line ended before every field was read.
    #[error("record truncated at line {line}, column {column}")]
    Truncated { line: usize, column: usize },

    #[error("checksum mismatch on line {line}: expected 0x{expected:02X}, found 0x{found:02X}")]
    ChecksumMismatch { line: usize, expected: u8, found: u8 },

    #[error("unhandled hex record type {} on line {line}", type_name(.raw))]
    UnknownRecordType { raw: u8, line: usize },

    #[error("{} record on line {line} carries {actual} payload bytes, expected {expected}",
        .record_type.name())]
    InvalidPayloadLength {
        record_type: RecordType,
        expected: usize,
        actual: usize,
        line: usize,
    },

    /// Encoding side: payload does not fit a single-byte count.
    #[error("record payload too long: {have} > {max}")]
    PayloadTooLong { have: usize, max: usize },
}

fn type_name(raw: &u8) -> String {
    enum_name_or_hex::<RecordType>(*raw)
}

impl RecordError {
    /// Line the error refers to, when it came from decoding.
    pub fn line(&self) -> Option<usize> {
        use RecordError::*;
        match self {
            MalformedRecord { line }
            | InvalidHexDigit { line, .. }
            | Truncated { line, .. }
            | ChecksumMismatch { line, .. }
            | UnknownRecordType { line, .. }
            | InvalidPayloadLength { line, .. } => Some(*line),
            PayloadTooLong { .. } => None,
        }
    }
}
