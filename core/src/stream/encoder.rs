//! stream/encoder.rs
//!
//! Encode cursor over one memory image.
//!
//! Design notes:
//! - Lines come out in ascending address order.
//! - The implied window at start is 0, so images below 64 KiB get no
//!   extended-linear-address record.
//! - A data record never straddles a 64 KiB boundary; a chunk is cut at the
//!   end of its window and the next one starts after a fresh ELA record.
//! - The sequence always ends with exactly one `:00000001FF`.

use crate::constants::{MAX_ADDRESS_SPACE, WINDOW_SIZE};
use crate::memory::{Address, MemoryBuffer};
use crate::record::encode::body;
use crate::record::{encode_record, end_of_file_record, extended_linear_address_record, start_linear_address_record, RecordType};
use crate::stream::types::{EncodeConfig, EncodeError, LineEnding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Data,
    StartAddress,
    EndOfFile,
    Finished,
}

#[derive(Debug, Clone)]
pub struct HexEncoder<'a> {
    data: &'a [u8],
    base: Address,
    ptr: Address,
    end: Address,
    window: Address,
    max_line_bytes: usize,
    line_ending: LineEnding,
    start_linear_address: Option<u32>,
    phase: Phase,
}

impl<'a> HexEncoder<'a> {
    /// Cursor over the stored range of `image`.
    pub fn new(image: &'a MemoryBuffer, config: &EncodeConfig) -> Result<Self, EncodeError> {
        Self::from_slice(image.start_address().unwrap_or(0), image.as_slice(), config)
    }

    /// Cursor over `data` placed at `address`.
    pub fn from_slice(address: Address, data: &'a [u8], config: &EncodeConfig) -> Result<Self, EncodeError> {
        config.validate()?;

        let end = match address.checked_add(data.len() as Address) {
            Some(end) if end <= MAX_ADDRESS_SPACE => end,
            Some(end) => return Err(EncodeError::AddressOutOfRange { end }),
            None => return Err(EncodeError::AddressOutOfRange { end: Address::MAX }),
        };

        Ok(Self {
            data,
            base: address,
            ptr: address,
            end,
            window: 0,
            max_line_bytes: config.max_line_bytes,
            line_ending: config.line_ending,
            start_linear_address: config.start_linear_address,
            phase: Phase::Data,
        })
    }

    /// Payload bytes already emitted.
    pub fn bytes_encoded(&self) -> u64 {
        self.ptr - self.base
    }

    pub fn total_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// End-of-file record has been produced.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    fn next_data(&mut self) -> Option<String> {
        if self.ptr >= self.end {
            return None;
        }

        let window = self.ptr / WINDOW_SIZE;
        if window != self.window {
            self.window = window;
            // `end <= 2^32` keeps every window index within 16 bits.
            return Some(extended_linear_address_record(window as u16));
        }

        let window_end = (window + 1) * WINDOW_SIZE;
        let count = (self.max_line_bytes as Address)
            .min(self.end - self.ptr)
            .min(window_end - self.ptr) as usize;

        let offset = (self.ptr - self.base) as usize;
        let low16 = (self.ptr % WINDOW_SIZE) as u16;
        let line = encode_record(&body(RecordType::Data, low16, &self.data[offset..offset + count]));

        self.ptr += count as Address;
        Some(line)
    }
}

impl Iterator for HexEncoder<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            match self.phase {
                Phase::Data => match self.next_data() {
                    Some(line) => return Some(line),
                    None => self.phase = Phase::StartAddress,
                },
                Phase::StartAddress => {
                    self.phase = Phase::EndOfFile;
                    if let Some(eip) = self.start_linear_address {
                        return Some(start_linear_address_record(eip));
                    }
                }
                Phase::EndOfFile => {
                    self.phase = Phase::Finished;
                    return Some(end_of_file_record());
                }
                Phase::Finished => return None,
            }
        }
    }
}

/// All lines for `image`, each followed by the configured line ending.
pub fn encode_to_string(image: &MemoryBuffer, config: &EncodeConfig) -> Result<String, EncodeError> {
    let encoder = HexEncoder::new(image, config)?;
    let ending = encoder.line_ending().as_str();

    let mut out = String::new();
    for line in encoder {
        out.push_str(&line);
        out.push_str(ending);
    }
    Ok(out)
}
