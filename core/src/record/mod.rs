//! Record-level codec for Intel HEX lines.
//!
//! Responsibilities:
//! - Encode a byte run into a checksummed line
//! - Decode a line into its fields with checksum verification
//!
//! Non-responsibilities:
//! - Address state (see `address`)
//! - Line I/O

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{DecodedRecord, RecordError, RecordType};
pub use encode::*;
pub use decode::{decode_record, RecordReader};
