// Record codec suite:
//
// * checksum arithmetic
// * typed record builders
// * field decoding, case-insensitivity, junk tolerance
// * error kinds with line/column positions

#[cfg(test)]
mod tests {
    use ihex_core::constants::EOF_RECORD;
    use ihex_core::record::{
        checksum, data_record, decode_record, encode_record, end_of_file_record,
        extended_linear_address_record, extended_segment_address_record, record_bytes,
        start_linear_address_record, start_segment_address_record, RecordError, RecordReader,
        RecordType,
    };

// ## 1️⃣ Checksum + raw encoding

    #[test]
    fn checksum_is_twos_complement() {
        assert_eq!(checksum(&[0x02, 0x00, 0x00, 0x04, 0x00, 0x01]), 0xF9);
        assert_eq!(checksum(&[]), 0x00);
        assert_eq!(checksum(&[0x00, 0x00, 0x00, 0x01]), 0xFF);
        assert_eq!(checksum(&[0xFF, 0x01]), 0x00);
    }

    #[test]
    fn encode_record_prefixes_mark_and_appends_checksum() {
        assert_eq!(encode_record(&[0x02, 0x00, 0x00, 0x04, 0x00, 0x01]), ":020000040001F9");
    }

    #[test]
    fn encode_record_is_uppercase() {
        let line = encode_record(&[0x01, 0xab, 0xcd, 0x00, 0xef]);
        assert_eq!(line, line.to_uppercase());
    }

// ## 2️⃣ Typed builders

    #[test]
    fn end_of_file_record_is_canonical() {
        assert_eq!(end_of_file_record(), EOF_RECORD);
        assert_eq!(end_of_file_record(), ":00000001FF");
    }

    #[test]
    fn address_record_builders() {
        assert_eq!(extended_linear_address_record(1), ":020000040001F9");
        assert_eq!(extended_linear_address_record(0x8001), ":02000004800179");
        assert_eq!(extended_segment_address_record(0x1200), ":020000021200EA");
        assert_eq!(start_linear_address_record(0x0800_0000), ":0400000508000000EF");
        assert_eq!(start_segment_address_record(0x1234, 0x5678), ":0400000312345678E5");
    }

    #[test]
    fn data_record_builder() {
        assert_eq!(data_record(0x0000, &[0xDE, 0xAD]).unwrap(), ":02000000DEAD73");
        assert_eq!(data_record(0x0100, &[1, 2, 3]).unwrap(), ":03010000010203F6");
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let payload = vec![0u8; 256];
        assert_eq!(
            data_record(0, &payload).unwrap_err(),
            RecordError::PayloadTooLong { have: 256, max: 255 }
        );
        assert!(record_bytes(RecordType::Data, 0, &payload[..255]).is_ok());
    }

// ## 3️⃣ Decoding

    #[test]
    fn decode_reference_data_record() {
        let r = decode_record(":10010000214601360121470136007EFE09D2190140", 1).unwrap();

        assert_eq!(r.byte_count, 0x10);
        assert_eq!(r.address_low16, 0x0100);
        assert_eq!(r.kind().unwrap(), RecordType::Data);
        assert_eq!(
            r.payload,
            vec![0x21, 0x46, 0x01, 0x36, 0x01, 0x21, 0x47, 0x01, 0x36, 0x00, 0x7E, 0xFE, 0x09, 0xD2, 0x19, 0x01]
        );
        assert_eq!(r.checksum, 0x40);
        assert!(r.checksum_ok);
        r.verify().unwrap();
    }

    #[test]
    fn decode_is_case_insensitive() {
        let upper = decode_record(":02000000DEAD73", 1).unwrap();
        let lower = decode_record(":02000000dead73", 1).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower.payload, vec![0xDE, 0xAD]);
    }

    #[test]
    fn text_around_the_record_is_ignored() {
        let r = decode_record("  xx:00000001FF\r", 4).unwrap();
        assert_eq!(r.kind().unwrap(), RecordType::EndOfFile);
        assert!(r.checksum_ok);
        assert_eq!(r.line, 4);
    }

    #[test]
    fn decode_keeps_unknown_type_raw() {
        let r = decode_record(":00000006FA", 1).unwrap();
        assert_eq!(r.record_type, 6);
        assert!(r.checksum_ok);
        assert_eq!(r.kind().unwrap_err(), RecordError::UnknownRecordType { raw: 6, line: 1 });
    }

    #[test]
    fn reader_check_reads_trailing_byte() {
        let mut rr = RecordReader::new(":00000001FF", 1).unwrap();
        for _ in 0..4 {
            rr.get_byte().unwrap();
        }
        assert_eq!(rr.sum(), 0x01);
        assert!(rr.check().unwrap());
        assert_eq!(rr.last_byte(), 0xFF);
    }

// ## 4️⃣ Errors

    #[test]
    fn missing_mark_is_malformed() {
        assert_eq!(
            decode_record("00000001FF", 3).unwrap_err(),
            RecordError::MalformedRecord { line: 3 }
        );
    }

    #[test]
    fn invalid_hex_digit_reports_position() {
        assert_eq!(
            decode_record(":0G000001FF", 1).unwrap_err(),
            RecordError::InvalidHexDigit { digit: 'G', line: 1, column: 3 }
        );
    }

    #[test]
    fn non_ascii_digit_is_reported_as_char() {
        let err = decode_record(":00é0000001FF", 2).unwrap_err();
        assert_eq!(err, RecordError::InvalidHexDigit { digit: 'é', line: 2, column: 4 });
    }

    #[test]
    fn short_line_is_truncated() {
        assert_eq!(
            decode_record(":020000", 1).unwrap_err(),
            RecordError::Truncated { line: 1, column: 8 }
        );
        assert_eq!(
            decode_record(":02000000DE", 1).unwrap_err(),
            RecordError::Truncated { line: 1, column: 12 }
        );
    }

    #[test]
    fn checksum_mismatch_is_not_a_decode_failure() {
        let r = decode_record(":02000000DEAD00", 7).unwrap();
        assert!(!r.checksum_ok);
        assert_eq!(r.payload, vec![0xDE, 0xAD]);
        assert_eq!(
            r.verify().unwrap_err(),
            RecordError::ChecksumMismatch { line: 7, expected: 0x73, found: 0x00 }
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RecordError::MalformedRecord { line: 3 }.to_string(),
            "discarding malformed record on line 3"
        );
        assert_eq!(
            RecordError::UnknownRecordType { raw: 6, line: 1 }.to_string(),
            "unhandled hex record type 0x6 on line 1"
        );
        assert_eq!(
            RecordError::InvalidHexDigit { digit: 'G', line: 1, column: 3 }.to_string(),
            "invalid hex digit 'G' at line 1, column 3"
        );
        assert_eq!(RecordError::PayloadTooLong { have: 256, max: 255 }.line(), None);
        assert_eq!(RecordError::Truncated { line: 9, column: 2 }.line(), Some(9));
    }
}
