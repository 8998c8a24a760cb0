//! address/translator.rs
//!
//! Extended-address bookkeeping for one decode session.
//!
//! - Type 2 sets the segment base (`value * 16`).
//! - Type 4 sets the linear base (`value * 65536`).
//! - Every other record leaves the state untouched.
//!
//! `absolute = linear base + segment base + addressLow16`. No 64 KiB
//! wrap is applied inside a segment.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{SEGMENT_MULTIPLIER, WINDOW_SIZE};
use crate::memory::Address;
use crate::record::{DecodedRecord, RecordError, RecordType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressState {
    pub extended_segment_address: u32,
    pub extended_linear_address: u32,
}

/// What a single record means once address state has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEvent {
    Data { address: Address, payload: Vec<u8> },
    EndOfFile,
    ExtendedSegmentAddress(u32),
    ExtendedLinearAddress(u32),
    StartSegmentAddress { cs: u16, ip: u16 },
    StartLinearAddress(u32),
}

impl RecordEvent {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordEvent::Data { .. } => RecordType::Data,
            RecordEvent::EndOfFile => RecordType::EndOfFile,
            RecordEvent::ExtendedSegmentAddress(_) => RecordType::ExtendedSegmentAddress,
            RecordEvent::ExtendedLinearAddress(_) => RecordType::ExtendedLinearAddress,
            RecordEvent::StartSegmentAddress { .. } => RecordType::StartSegmentAddress,
            RecordEvent::StartLinearAddress(_) => RecordType::StartLinearAddress,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddressTranslator {
    state: AddressState,
}

impl AddressTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AddressState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = AddressState::default();
    }

    /// Absolute address of a record's low-16 address field.
    #[inline]
    pub fn resolve(&self, address_low16: u16) -> Address {
        self.state.extended_linear_address as Address
            + self.state.extended_segment_address as Address
            + address_low16 as Address
    }

    /// Apply one decoded record, returning its resolved meaning.
    ///
    /// Unknown types and address/start records with the wrong payload
    /// length are errors and leave the state unchanged.
    pub fn apply(&mut self, record: DecodedRecord) -> Result<RecordEvent, RecordError> {
        let kind = record.kind()?;

        if let Some(expected) = kind.expected_payload_len() {
            if record.payload.len() != expected {
                return Err(RecordError::InvalidPayloadLength {
                    record_type: kind,
                    expected,
                    actual: record.payload.len(),
                    line: record.line,
                });
            }
        }

        let event = match kind {
            RecordType::Data => RecordEvent::Data {
                address: self.resolve(record.address_low16),
                payload: record.payload,
            },
            RecordType::EndOfFile => RecordEvent::EndOfFile,
            RecordType::ExtendedSegmentAddress => {
                let value = BigEndian::read_u16(&record.payload) as u32;
                self.state.extended_segment_address = value * SEGMENT_MULTIPLIER;
                RecordEvent::ExtendedSegmentAddress(self.state.extended_segment_address)
            }
            RecordType::ExtendedLinearAddress => {
                let value = BigEndian::read_u16(&record.payload) as u32;
                self.state.extended_linear_address = value * WINDOW_SIZE as u32;
                RecordEvent::ExtendedLinearAddress(self.state.extended_linear_address)
            }
            RecordType::StartSegmentAddress => RecordEvent::StartSegmentAddress {
                cs: BigEndian::read_u16(&record.payload[0..2]),
                ip: BigEndian::read_u16(&record.payload[2..4]),
            },
            RecordType::StartLinearAddress => {
                RecordEvent::StartLinearAddress(BigEndian::read_u32(&record.payload))
            }
        };

        Ok(event)
    }
}
