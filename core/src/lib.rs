//! ihex-core
//!
//! Intel HEX codec and sparse memory image.
//! No CLI, no global state.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Building blocks
pub mod memory;
pub mod record;
pub mod address;
pub mod diagnostics;
pub mod telemetry;

// Session layer
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::diagnostics::{CollectingSink, DiagnosticSink, LogSink, NullSink};
    pub use crate::memory::{Address, BufferError, MemoryBuffer};
    pub use crate::record::{decode_record, encode_record, DecodedRecord, RecordError, RecordType};
    pub use crate::stream::{
        encode_to_string, read_hex, read_hex_file, write_hex, write_hex_file, DecodeConfig,
        DecodeReport, DecodeSession, DecodeStatus, EncodeConfig, HexEncoder, LineEnding,
    };
    pub use crate::types::HexError;
}
