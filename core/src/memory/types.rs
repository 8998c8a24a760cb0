//! memory/types.rs
//! Address alias and buffer errors.

use thiserror::Error;

/// Absolute byte address inside a memory image.
///
/// Wider than the 32-bit Intel HEX address space so that the exclusive end
/// of a write touching `0xFFFF_FFFF` stays representable.
pub type Address = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Requested window lies (partly) outside the stored range.
    /// `start`/`end` are `None` when nothing has been written yet.
    #[error("read out of range: address 0x{address:x} length {length} (stored {}..{})",
        fmt_bound(.start), fmt_bound(.end))]
    Range {
        address: Address,
        length: usize,
        start: Option<Address>,
        end: Option<Address>,
    },

    /// Growth increment must be non-zero.
    #[error("invalid growth increment: zero")]
    ZeroIncrement,
}

fn fmt_bound(b: &Option<Address>) -> String {
    match b {
        Some(v) => format!("0x{:x}", v),
        None => "unset".into(),
    }
}
