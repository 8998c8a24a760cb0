//! memory/mod.rs
//! Sparse memory image used as the target of decoding and the source of
//! encoding.

pub mod types;
pub mod buffer;

pub use types::*;
pub use buffer::MemoryBuffer;
