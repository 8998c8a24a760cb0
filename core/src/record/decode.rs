//! record/decode.rs
//!
//! Record decoding utilities.
//!
//! Design notes:
//! - Anything before the first ':' is ignored, as is anything after the
//!   checksum byte.
//! - Fields are read strictly in wire order through `RecordReader`, which
//!   keeps the running byte sum.
//! - Hex digits are case-insensitive.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::RECORD_MARK;
use crate::record::types::{DecodedRecord, RecordError};

#[inline]
fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Sequential hex-pair reader over one line.
#[derive(Debug)]
pub struct RecordReader<'a> {
    text: &'a str,
    pos: usize,
    sum: u8,
    last: u8,
    line: usize,
}

impl<'a> RecordReader<'a> {
    /// Position the reader just after the record mark.
    pub fn new(text: &'a str, line: usize) -> Result<Self, RecordError> {
        let mark = text.find(RECORD_MARK).ok_or(RecordError::MalformedRecord { line })?;
        Ok(Self { text, pos: mark + RECORD_MARK.len_utf8(), sum: 0, last: 0, line })
    }

    /// 1-based column of the next character to be read.
    pub fn column(&self) -> usize {
        self.pos + 1
    }

    /// Running sum of every byte read so far, mod 256.
    pub fn sum(&self) -> u8 {
        self.sum
    }

    /// Value of the most recently read byte.
    pub fn last_byte(&self) -> u8 {
        self.last
    }

    /// Read the next two hex digits as one byte and add it to the sum.
    pub fn get_byte(&mut self) -> Result<u8, RecordError> {
        let bytes = self.text.as_bytes();
        let mut val = 0u8;

        for _ in 0..2 {
            let Some(&c) = bytes.get(self.pos) else {
                return Err(RecordError::Truncated { line: self.line, column: self.column() });
            };
            let Some(d) = hex_digit(c) else {
                // pos only ever advances over ASCII, so it sits on a char boundary.
                let digit = self.text[self.pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(RecordError::InvalidHexDigit { digit, line: self.line, column: self.column() });
            };
            val = (val << 4) | d;
            self.pos += 1;
        }

        self.sum = self.sum.wrapping_add(val);
        self.last = val;
        Ok(val)
    }

    /// Read the trailing checksum byte; `true` when the record sums to zero.
    pub fn check(&mut self) -> Result<bool, RecordError> {
        self.get_byte()?;
        Ok(self.sum == 0)
    }
}

/// Decode one line into its fields.
///
/// # Returns
/// - `Ok(DecodedRecord)` when every field parsed, whether or not the
///   checksum matched (see `DecodedRecord::checksum_ok`).
/// - `Err(MalformedRecord)` when the line has no ':'.
/// - `Err(InvalidHexDigit | Truncated)` when a field cannot be read.
pub fn decode_record(text: &str, line: usize) -> Result<DecodedRecord, RecordError> {
    let mut r = RecordReader::new(text, line)?;

    let byte_count = r.get_byte()?;
    let addr = [r.get_byte()?, r.get_byte()?];
    let address_low16 = BigEndian::read_u16(&addr);
    let record_type = r.get_byte()?;

    let mut payload = Vec::with_capacity(byte_count as usize);
    for _ in 0..byte_count {
        payload.push(r.get_byte()?);
    }

    let expected_checksum = r.sum().wrapping_neg();
    let checksum_ok = r.check()?;

    Ok(DecodedRecord {
        byte_count,
        address_low16,
        record_type,
        payload,
        checksum: r.last_byte(),
        expected_checksum,
        checksum_ok,
        line,
    })
}
