//! stream/decoder.rs
//!
//! Line-by-line decode session.
//!
//! State machine: `Reading -> {Reading, Done}`. `happy` starts true and can
//! only ever go false. Format problems never abort the session; they are
//! reported through the diagnostic sink and folded into `happy`.

use crate::address::{AddressState, AddressTranslator, RecordEvent};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::memory::MemoryBuffer;
use crate::record::{decode_record, RecordError};
use crate::stream::types::{ConfigError, DecodeConfig, DecodeReport, LineOutcome};
use crate::telemetry::RecordCounters;
use crate::utils::fmt_bytes;

#[derive(Debug)]
pub struct DecodeSession<D: DiagnosticSink = LogSink> {
    translator: AddressTranslator,
    image: MemoryBuffer,
    line: usize,
    done: bool,
    happy: bool,
    start_linear_address: Option<u32>,
    start_segment_address: Option<(u16, u16)>,
    counters: RecordCounters,
    sink: D,
}

impl Default for DecodeSession<LogSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeSession<LogSink> {
    /// Session with default config reporting through the `log` facade.
    pub fn new() -> Self {
        Self::with_sink(LogSink)
    }
}

impl<D: DiagnosticSink> DecodeSession<D> {
    pub fn with_sink(sink: D) -> Self {
        Self {
            translator: AddressTranslator::new(),
            image: MemoryBuffer::new(),
            line: 0,
            done: false,
            happy: true,
            start_linear_address: None,
            start_segment_address: None,
            counters: RecordCounters::default(),
            sink,
        }
    }

    pub fn with_config(config: &DecodeConfig, sink: D) -> Result<Self, ConfigError> {
        config.validate()?;
        let image = MemoryBuffer::with_increment(config.buffer_increment)
            .map_err(|_| ConfigError::IncrementZero)?;
        Ok(Self { image, ..Self::with_sink(sink) })
    }

    /// Feed one line; `true` while the session is happy and not done.
    pub fn decode_record(&mut self, text: &str) -> bool {
        match self.decode_line(text) {
            Ok(outcome) => log::trace!("line {}: {:?}", self.line, outcome),
            // already folded into `happy` and reported to the sink
            Err(e) => log::debug!("line {}: {}", self.line, e),
        }
        self.happy && !self.done
    }

    /// Feed one line and get its outcome.
    ///
    /// An `Err` never ends the session. Effects of the record are applied
    /// before a checksum mismatch is returned: a data payload is still
    /// written and an end-of-file record still sets `done`.
    pub fn decode_line(&mut self, text: &str) -> Result<LineOutcome, RecordError> {
        self.line += 1;
        self.counters.lines += 1;
        let line = self.line;

        let text = text.trim();
        if text.is_empty() {
            return Ok(LineOutcome::Blank);
        }
        if self.done {
            self.sink.warn(&format!("ignoring record after end-of-file on line {}", line));
            return Ok(LineOutcome::AfterEof);
        }

        let record = match decode_record(text, line) {
            Ok(record) => record,
            Err(e @ RecordError::MalformedRecord { .. }) => {
                // Discarded without touching session state.
                self.counters.malformed += 1;
                self.sink.warn(&e.to_string());
                return Err(e);
            }
            Err(e) => {
                self.counters.invalid_records += 1;
                self.fail(&e);
                return Err(e);
            }
        };

        let checksum = record.verify();
        if let Err(e) = &checksum {
            self.counters.checksum_failures += 1;
            self.fail(e);
        }

        let payload_len = record.payload.len();
        let event = match self.translator.apply(record) {
            Ok(event) => event,
            Err(e) => {
                match e {
                    RecordError::UnknownRecordType { .. } => self.counters.records_unknown += 1,
                    _ => self.counters.invalid_records += 1,
                }
                self.fail(&e);
                return Err(e);
            }
        };

        self.counters.add_record(event.record_type(), payload_len);
        self.dispatch(&event);

        checksum?;
        Ok(LineOutcome::Record(event))
    }

    /// Feed every line of `lines` in order.
    pub fn decode_lines<I, S>(&mut self, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for l in lines {
            self.decode_record(l.as_ref());
        }
        self.happy && !self.done
    }

    fn dispatch(&mut self, event: &RecordEvent) {
        match event {
            RecordEvent::Data { address, payload } => {
                log::debug!("line {}: {} data bytes at 0x{:08x}", self.line, payload.len(), address);
                log::trace!("line {}: {}", self.line, fmt_bytes(payload));
                self.image.write(*address, payload);
            }
            RecordEvent::EndOfFile => {
                self.done = true;
            }
            RecordEvent::ExtendedSegmentAddress(v) => {
                self.sink.info(&format!("extended_segment_address: 0x{:x}", v));
            }
            RecordEvent::ExtendedLinearAddress(v) => {
                self.sink.info(&format!("extended_linear_address: 0x{:x}", v));
            }
            RecordEvent::StartSegmentAddress { cs, ip } => {
                self.start_segment_address = Some((*cs, *ip));
                self.sink.info(&format!("start_segment_address: 0x{:04x}:0x{:04x}", cs, ip));
            }
            RecordEvent::StartLinearAddress(v) => {
                self.start_linear_address = Some(*v);
                self.sink.info(&format!("start_linear_address: 0x{:x}", v));
            }
        }
    }

    fn fail(&mut self, e: &RecordError) {
        self.happy = false;
        self.sink.warn(&e.to_string());
    }

    /// End-of-file record seen.
    pub fn done(&self) -> bool {
        self.done
    }

    /// No format problem seen so far.
    pub fn happy(&self) -> bool {
        self.happy
    }

    /// Lines fed so far, including blank and discarded ones.
    pub fn lines(&self) -> usize {
        self.line
    }

    pub fn image(&self) -> &MemoryBuffer {
        &self.image
    }

    pub fn address_state(&self) -> AddressState {
        self.translator.state()
    }

    pub fn start_linear_address(&self) -> Option<u32> {
        self.start_linear_address
    }

    pub fn counters(&self) -> &RecordCounters {
        &self.counters
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn finish(self) -> DecodeReport {
        self.into_parts().0
    }

    /// Finish and hand back the sink as well.
    pub fn into_parts(self) -> (DecodeReport, D) {
        let report = DecodeReport {
            image: self.image,
            done: self.done,
            happy: self.happy,
            start_linear_address: self.start_linear_address,
            start_segment_address: self.start_segment_address,
            lines: self.line,
            counters: self.counters,
        };
        (report, self.sink)
    }
}
