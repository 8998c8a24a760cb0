//! stream/io.rs
//!
//! Line-source / line-sink glue between the codec and `std::io`.
//!
//! - Decoding reads `BufRead` line by line; lines are not required to be
//!   valid UTF-8 (bad bytes end up as invalid hex digits, not I/O errors).
//! - Encoding writes one record per line with the configured terminator.
//! - Only genuine I/O failures are returned as errors.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::diagnostics::DiagnosticSink;
use crate::memory::{Address, MemoryBuffer};
use crate::stream::decoder::DecodeSession;
use crate::stream::encoder::HexEncoder;
use crate::stream::types::{DecodeConfig, DecodeReport, EncodeConfig};
use crate::types::HexError;
use crate::utils::percent;

/// Progress callback receiving whole percentages.
pub type ProgressFn<'a> = &'a mut dyn FnMut(u8);

/// Calls the callback only when the percentage grows, so observers see a
/// non-decreasing sequence without repeats.
pub struct ProgressTracker<'a> {
    callback: Option<ProgressFn<'a>>,
    last: Option<u8>,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(callback: Option<ProgressFn<'a>>) -> Self {
        Self { callback, last: None }
    }

    pub fn update(&mut self, done: u64, total: u64) {
        let Some(cb) = self.callback.as_deref_mut() else { return };
        let p = percent(done, total);
        if self.last.map_or(true, |last| p > last) {
            cb(p);
            self.last = Some(p);
        }
    }

    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

/// Drive `session` with every line of `reader`.
///
/// `total_len` is the expected input size in bytes, used only for progress.
pub fn read_hex<R, D>(
    mut reader: R,
    mut session: DecodeSession<D>,
    total_len: Option<u64>,
    progress: Option<ProgressFn<'_>>,
) -> Result<DecodeReport, HexError>
where
    R: BufRead,
    D: DiagnosticSink,
{
    let mut tracker = ProgressTracker::new(progress);
    let mut buf = Vec::with_capacity(128);
    let mut bytes_read = 0u64;

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }
        bytes_read += n as u64;

        let line = String::from_utf8_lossy(&buf);
        session.decode_record(&line);

        if let Some(total) = total_len {
            tracker.update(bytes_read, total);
        }
    }

    if total_len.is_some() {
        tracker.update(1, 1);
    }
    if !session.done() {
        log::warn!("input ended after {} lines without an end-of-file record", session.lines());
    }

    Ok(session.finish())
}

/// Write every line of `encoder` to `writer`; returns the number of lines.
pub fn write_hex<W: Write>(
    mut writer: W,
    mut encoder: HexEncoder<'_>,
    progress: Option<ProgressFn<'_>>,
) -> Result<usize, HexError> {
    let mut tracker = ProgressTracker::new(progress);
    let ending = encoder.line_ending().as_str().as_bytes();
    let total = encoder.total_bytes();
    let mut lines = 0usize;

    while let Some(line) = encoder.next() {
        writer.write_all(line.as_bytes())?;
        writer.write_all(ending)?;
        lines += 1;
        tracker.update(encoder.bytes_encoded(), total);
    }

    writer.flush()?;
    Ok(lines)
}

/// Decode a HEX file from disk.
pub fn read_hex_file<P, D>(
    path: P,
    config: &DecodeConfig,
    sink: D,
    progress: Option<ProgressFn<'_>>,
) -> Result<DecodeReport, HexError>
where
    P: AsRef<Path>,
    D: DiagnosticSink,
{
    let file = File::open(path.as_ref())?;
    let total = file.metadata()?.len();
    let session = DecodeSession::with_config(config, sink)?;
    read_hex(BufReader::new(file), session, Some(total), progress)
}

/// Encode `data` placed at `address` into a HEX file.
pub fn write_hex_file<P: AsRef<Path>>(
    path: P,
    address: Address,
    data: &[u8],
    config: &EncodeConfig,
    progress: Option<ProgressFn<'_>>,
) -> Result<usize, HexError> {
    let encoder = HexEncoder::from_slice(address, data, config)?;
    let file = File::create(path.as_ref())?;
    write_hex(BufWriter::new(file), encoder, progress)
}

pub fn read_binary_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, HexError> {
    Ok(std::fs::read(path.as_ref())?)
}

/// Write the stored range of `image` as a raw binary.
pub fn write_binary_file<P: AsRef<Path>>(path: P, image: &MemoryBuffer) -> Result<(), HexError> {
    std::fs::write(path.as_ref(), image.as_slice())?;
    Ok(())
}
