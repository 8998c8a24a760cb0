//! Stream layer: decode sessions, encode cursors and the line I/O glue
//! around them.
//!
//! Ordering:
//! - decode consumes lines strictly in input order
//! - encode emits records in ascending address order

pub mod types;
pub mod decoder;
pub mod encoder;
pub mod io;

pub use types::*;
pub use decoder::DecodeSession;
pub use encoder::{encode_to_string, HexEncoder};
pub use io::{read_binary_file, read_hex, read_hex_file, write_binary_file, write_hex, write_hex_file, ProgressFn, ProgressTracker};
