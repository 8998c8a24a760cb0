//! record/encode.rs
//!
//! Record encoding utilities.
//!
//! Design notes:
//! - `encode_record` is the only place a line is assembled; the typed
//!   builders only lay out `[count, addr_hi, addr_lo, type, payload..]`.
//! - Hex digits are always uppercase.
//! - Multi-byte address fields are big-endian on the wire.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{MAX_RECORD_BYTES, RECORD_MARK};
use crate::record::types::{RecordError, RecordType};

/// Two's complement of the byte sum, mod 256.
#[inline]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b)).wrapping_neg()
}

/// Encode a raw byte run as one line: `':'`, hex pairs, checksum.
///
/// The terminator is not part of the line.
pub fn encode_record(bytes: &[u8]) -> String {
    let mut line = String::with_capacity(1 + 2 * (bytes.len() + 1));
    line.push(RECORD_MARK);
    line.push_str(&hex::encode_upper(bytes));
    line.push_str(&hex::encode_upper([checksum(bytes)]));
    line
}

/// Record body (everything except the checksum) for `record_type`.
pub fn record_bytes(
    record_type: RecordType,
    address_low16: u16,
    payload: &[u8],
) -> Result<Vec<u8>, RecordError> {
    if payload.len() > MAX_RECORD_BYTES {
        return Err(RecordError::PayloadTooLong { have: payload.len(), max: MAX_RECORD_BYTES });
    }
    Ok(body(record_type, address_low16, payload))
}

/// Caller guarantees `payload.len() <= 255`.
pub(crate) fn body(record_type: RecordType, address_low16: u16, payload: &[u8]) -> Vec<u8> {
    debug_assert!(payload.len() <= MAX_RECORD_BYTES, "payload exceeds byte count field");

    let mut addr = [0u8; 2];
    BigEndian::write_u16(&mut addr, address_low16);

    let mut out = Vec::with_capacity(4 + payload.len());
    out.push(payload.len() as u8);
    out.extend_from_slice(&addr);
    out.push(record_type.into());
    out.extend_from_slice(payload);
    out
}

/// Data record of up to 255 bytes at `address_low16`.
pub fn data_record(address_low16: u16, payload: &[u8]) -> Result<String, RecordError> {
    Ok(encode_record(&record_bytes(RecordType::Data, address_low16, payload)?))
}

// Address/start records have payloads of at most 4 bytes.
fn fixed_record(record_type: RecordType, payload: &[u8]) -> String {
    encode_record(&body(record_type, 0, payload))
}

/// Type 2: `segment * 16` becomes the base of subsequent data records.
pub fn extended_segment_address_record(segment: u16) -> String {
    let mut p = [0u8; 2];
    BigEndian::write_u16(&mut p, segment);
    fixed_record(RecordType::ExtendedSegmentAddress, &p)
}

/// Type 3: 80x86 `CS:IP` entry point.
pub fn start_segment_address_record(cs: u16, ip: u16) -> String {
    let mut p = [0u8; 4];
    BigEndian::write_u16(&mut p[0..2], cs);
    BigEndian::write_u16(&mut p[2..4], ip);
    fixed_record(RecordType::StartSegmentAddress, &p)
}

/// Type 4: upper 16 bits of the address for subsequent data records.
pub fn extended_linear_address_record(window: u16) -> String {
    let mut p = [0u8; 2];
    BigEndian::write_u16(&mut p, window);
    fixed_record(RecordType::ExtendedLinearAddress, &p)
}

/// Type 5: 32-bit entry point.
pub fn start_linear_address_record(eip: u32) -> String {
    let mut p = [0u8; 4];
    BigEndian::write_u32(&mut p, eip);
    fixed_record(RecordType::StartLinearAddress, &p)
}

/// Type 1: always `:00000001FF`.
pub fn end_of_file_record() -> String {
    fixed_record(RecordType::EndOfFile, &[])
}
