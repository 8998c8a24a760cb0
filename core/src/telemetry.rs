//! telemetry.rs
//! Deterministic counters collected while decoding or encoding.
//!
//! Summary: counts records by type plus format problems, and converts into
//! a JSON snapshot for outer layers.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::record::RecordType;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounters {
    pub lines: u64,
    pub records_data: u64,
    pub records_eof: u64,
    pub records_segment: u64,
    pub records_linear: u64,
    pub records_start: u64,
    pub records_unknown: u64,
    pub malformed: u64,
    pub invalid_records: u64,
    pub checksum_failures: u64,
    pub bytes_data: u64,
}

impl RecordCounters {
    /// Record one well-formed record of a known type.
    pub fn add_record(&mut self, kind: RecordType, payload_len: usize) {
        match kind {
            RecordType::Data => {
                self.records_data += 1;
                self.bytes_data += payload_len as u64;
            }
            RecordType::EndOfFile => self.records_eof += 1,
            RecordType::ExtendedSegmentAddress => self.records_segment += 1,
            RecordType::ExtendedLinearAddress => self.records_linear += 1,
            RecordType::StartSegmentAddress | RecordType::StartLinearAddress => {
                self.records_start += 1
            }
        }
    }

    /// Total records seen of any type, well-formed or not.
    pub fn total_records(&self) -> u64 {
        self.records_data
            + self.records_eof
            + self.records_segment
            + self.records_linear
            + self.records_start
            + self.records_unknown
    }

    /// Number of non-fatal format problems.
    pub fn problems(&self) -> u64 {
        self.malformed + self.invalid_records + self.checksum_failures + self.records_unknown
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl AddAssign for RecordCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.lines += rhs.lines;
        self.records_data += rhs.records_data;
        self.records_eof += rhs.records_eof;
        self.records_segment += rhs.records_segment;
        self.records_linear += rhs.records_linear;
        self.records_start += rhs.records_start;
        self.records_unknown += rhs.records_unknown;
        self.malformed += rhs.malformed;
        self.invalid_records += rhs.invalid_records;
        self.checksum_failures += rhs.checksum_failures;
        self.bytes_data += rhs.bytes_data;
    }
}
