//! memory/buffer.rs
//!
//! Growable, address-indexed byte store backing a decoded image.
//!
//! Design notes:
//! - The store is anchored at the lowest address written so far.
//! - Growth happens in fixed `increment` steps, never by doubling, so the
//!   backing length after a sequence of writes is predictable.
//! - Gaps between sparse writes read back as zero.
//! - Bounds only ever widen.

use crate::constants::DEFAULT_BUFFER_INCREMENT;
use crate::memory::types::{Address, BufferError};

#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    start: Address,
    end: Address,
    store: Vec<u8>,
    increment: usize,
    growth_count: usize,
    allocated: bool,
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Two images are equal when they cover the same range with the same bytes,
/// regardless of backing length or growth history.
impl PartialEq for MemoryBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.start_address() == other.start_address()
            && self.end_address() == other.end_address()
            && self.as_slice() == other.as_slice()
    }
}

impl Eq for MemoryBuffer {}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self {
            start: 0,
            end: 0,
            store: Vec::new(),
            increment: DEFAULT_BUFFER_INCREMENT,
            growth_count: 0,
            allocated: false,
        }
    }

    /// Empty buffer with a custom growth step.
    pub fn with_increment(increment: usize) -> Result<Self, BufferError> {
        if increment == 0 {
            return Err(BufferError::ZeroIncrement);
        }
        Ok(Self { increment, ..Self::new() })
    }

    /// Buffer holding exactly `data` at `address`.
    pub fn from_bytes(address: Address, data: &[u8]) -> Self {
        let mut mem = Self::new();
        mem.write(address, data);
        mem
    }

    /// Copy `data` into the image at `address`, widening the bounds as needed.
    ///
    /// The first write (even an empty one) fixes the initial bounds.
    /// Bytes that would land past `Address::MAX` are dropped with a warning.
    pub fn write(&mut self, address: Address, data: &[u8]) {
        let room = (Address::MAX - address).min(data.len() as Address) as usize;
        if room < data.len() {
            log::warn!(
                "write at 0x{:x}: dropping {} bytes past the end of the address space",
                address,
                data.len() - room
            );
        }
        let data = &data[..room];
        let len = data.len() as Address;

        if !self.allocated {
            self.store = vec![0u8; self.increment];
            self.start = address;
            self.end = address + len;
            self.allocated = true;
            self.growth_count += 1;
        }

        // Left extension: new low region is zero, old contents shift up.
        if address < self.start {
            let shift = (self.start - address) as usize;
            let mut grown = vec![0u8; shift + self.store.len()];
            grown[shift..].copy_from_slice(&self.store);
            self.store = grown;
            self.start = address;
            self.growth_count += 1;
        }

        // `address >= start` after left extension.
        let needed = address + len - self.start;
        while needed > self.store.len() as Address {
            let new_len = self.store.len() + self.increment;
            self.store.resize(new_len, 0);
            self.growth_count += 1;
        }

        let offset = (address - self.start) as usize;
        self.store[offset..offset + data.len()].copy_from_slice(data);

        if address + len > self.end {
            self.end = address + len;
        }
    }

    /// Strict read of `[address, address + length)`.
    ///
    /// `address` defaults to the start of the image, `length` to the rest of
    /// the stored range. Any window not fully inside `[start, end)` fails
    /// with `BufferError::Range`; an empty window on an empty buffer is `Ok`.
    pub fn get_data(
        &self,
        address: Option<Address>,
        length: Option<usize>,
    ) -> Result<&[u8], BufferError> {
        let (address, length) = self.resolve_window(address, length);

        if !self.allocated {
            if length == 0 {
                return Ok(&[]);
            }
            return Err(self.range_error(address, length));
        }

        match address.checked_add(length as Address) {
            Some(want_end) if address >= self.start && want_end <= self.end => {}
            _ => return Err(self.range_error(address, length)),
        }

        let offset = (address - self.start) as usize;
        Ok(&self.store[offset..offset + length])
    }

    /// Permissive read: always returns exactly `length` bytes.
    ///
    /// Bytes outside the stored range are zero. An out-of-range window is
    /// reported through `log::warn!` but never fails.
    pub fn get_data_padded(&self, address: Option<Address>, length: Option<usize>) -> Vec<u8> {
        let (address, length) = self.resolve_window(address, length);
        let mut out = vec![0u8; length];

        if let Err(e) = self.get_data(Some(address), Some(length)) {
            log::warn!("padded read: {}", e);
        }
        if !self.allocated || length == 0 {
            return out;
        }

        let want_end = address.saturating_add(length as Address);
        let lo = address.max(self.start);
        let hi = want_end.min(self.end);
        if lo < hi {
            let src = (lo - self.start) as usize;
            let dst = (lo - address) as usize;
            let n = (hi - lo) as usize;
            out[dst..dst + n].copy_from_slice(&self.store[src..src + n]);
        }
        out
    }

    fn resolve_window(&self, address: Option<Address>, length: Option<usize>) -> (Address, usize) {
        let address = address.unwrap_or(self.start);
        let length = length.unwrap_or_else(|| self.end.saturating_sub(address) as usize);
        (address, length)
    }

    fn range_error(&self, address: Address, length: usize) -> BufferError {
        BufferError::Range {
            address,
            length,
            start: self.start_address(),
            end: self.end_address(),
        }
    }

    /// Inclusive lower bound, `None` before the first write.
    pub fn start_address(&self) -> Option<Address> {
        self.allocated.then_some(self.start)
    }

    /// Exclusive upper bound, `None` before the first write.
    pub fn end_address(&self) -> Option<Address> {
        self.allocated.then_some(self.end)
    }

    /// Number of bytes in `[start, end)`.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored range as one slice.
    pub fn as_slice(&self) -> &[u8] {
        if !self.allocated {
            return &[];
        }
        &self.store[..self.len()]
    }

    pub fn into_vec(mut self) -> Vec<u8> {
        let len = self.len();
        self.store.truncate(len);
        self.store
    }

    /// Length of the backing store (always a whole number of increments
    /// past the first allocation, plus any left extension).
    pub fn capacity_len(&self) -> usize {
        self.store.len()
    }

    /// Number of allocations/reallocations performed so far.
    pub fn growth_count(&self) -> usize {
        self.growth_count
    }

    pub fn increment(&self) -> usize {
        self.increment
    }
}
