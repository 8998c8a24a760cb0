/// Start-of-record marker for every Intel HEX line.
pub const RECORD_MARK: char = ':';

/// Canonical end-of-file record.
pub const EOF_RECORD: &str = ":00000001FF";

/// Defaults when no config is supplied.
pub const DEFAULT_MAX_LINE_BYTES: usize = 32;
/// `byteCount` is a single byte on the wire.
pub const MAX_RECORD_BYTES: usize = 0xFF;

/// Growth step of the memory image backing store (bytes).
pub const DEFAULT_BUFFER_INCREMENT: usize = 1024;

/// Size of one extended-linear-address window.
pub const WINDOW_SIZE: u64 = 0x1_0000;

/// Highest exclusive end address addressable through ELA records.
pub const MAX_ADDRESS_SPACE: u64 = 0x1_0000_0000;

/// Multiplier applied to an extended-segment-address value.
pub const SEGMENT_MULTIPLIER: u32 = 16;

/// Record type identifiers (mirrored in `record::RecordType`).
pub mod record_ids {
    pub const DATA: u8                     = 0x00;
    pub const END_OF_FILE: u8              = 0x01;
    pub const EXTENDED_SEGMENT_ADDRESS: u8 = 0x02;
    pub const START_SEGMENT_ADDRESS: u8    = 0x03;
    pub const EXTENDED_LINEAR_ADDRESS: u8  = 0x04;
    pub const START_LINEAR_ADDRESS: u8     = 0x05;
}
