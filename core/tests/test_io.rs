// I/O glue: reader/writer round trips, progress reporting and the file
// helpers. Files go to the OS temp dir under unique names.

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ihex_core::diagnostics::{CollectingSink, NullSink};
    use ihex_core::memory::MemoryBuffer;
    use ihex_core::stream::{
        read_binary_file, read_hex, read_hex_file, write_binary_file, write_hex, write_hex_file,
        DecodeConfig, DecodeSession, DecodeStatus, EncodeConfig, HexEncoder, LineEnding,
        ProgressTracker,
    };
    use ihex_core::types::HexError;

    const TEST_ADDRESS: u64 = 0x8001_0000;

    fn test_data(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * 7 + i / 256) & 0xFF) as u8).collect()
    }

    fn temp_path(tag: &str) -> PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("ihex-core-{}-{}-{}", std::process::id(), tag, n))
    }

    fn encode(address: u64, data: &[u8], cfg: &EncodeConfig) -> Vec<u8> {
        let mut out = Vec::new();
        let enc = HexEncoder::from_slice(address, data, cfg).unwrap();
        write_hex(&mut out, enc, None).unwrap();
        out
    }

// # ✅ 1. In-memory round trips

    #[test]
    fn writer_then_reader_restores_image() {
        let data = test_data(5000);
        let hex = encode(TEST_ADDRESS, &data, &EncodeConfig::default());

        let report = read_hex(Cursor::new(&hex), DecodeSession::with_sink(NullSink), None, None).unwrap();
        assert_eq!(report.status(), DecodeStatus::Clean);
        assert_eq!(report.image.start_address(), Some(TEST_ADDRESS));
        assert_eq!(report.image.as_slice(), data.as_slice());
    }

    #[test]
    fn reencoding_a_decoded_image_is_identical() {
        let data = test_data(5000);
        let cfg = EncodeConfig::default();
        let first = encode(TEST_ADDRESS, &data, &cfg);

        let report = read_hex(Cursor::new(&first), DecodeSession::with_sink(NullSink), None, None).unwrap();
        let mut second = Vec::new();
        write_hex(&mut second, HexEncoder::new(&report.image, &cfg).unwrap(), None).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn write_hex_counts_lines() {
        let mut out = Vec::new();
        let enc = HexEncoder::from_slice(0, &[0; 64], &EncodeConfig::default()).unwrap();
        assert_eq!(write_hex(&mut out, enc, None).unwrap(), 3);
        assert!(out.ends_with(b":00000001FF\r\n"));
    }

    #[test]
    fn lf_and_crlf_inputs_decode_alike() {
        let data = test_data(300);
        let crlf = encode(0x100, &data, &EncodeConfig::default());
        let lf = encode(0x100, &data, &EncodeConfig::default().with_line_ending(LineEnding::Lf));
        assert!(lf.len() < crlf.len());

        let a = read_hex(Cursor::new(&crlf), DecodeSession::with_sink(NullSink), None, None).unwrap();
        let b = read_hex(Cursor::new(&lf), DecodeSession::with_sink(NullSink), None, None).unwrap();
        assert_eq!(a.image, b.image);
        assert_eq!(a.status(), DecodeStatus::Clean);
        assert_eq!(b.status(), DecodeStatus::Clean);
    }

    #[test]
    fn non_utf8_line_is_a_record_problem_not_an_io_error() {
        let input: &[u8] = b":02000000\xFF\xFE73\n:03010000010203F6\n:00000001FF\n";
        let report = read_hex(Cursor::new(input), DecodeSession::with_sink(CollectingSink::new()), None, None).unwrap();

        assert!(!report.happy);
        assert!(report.done);
        assert_eq!(report.status(), DecodeStatus::DecodedWithWarnings);
        assert_eq!(report.image.as_slice(), &[1, 2, 3]);
        assert_eq!(report.counters.invalid_records, 1);
    }

    #[test]
    fn missing_eof_reports_incomplete() {
        let input: &[u8] = b":02000000DEAD73\n";
        let report = read_hex(Cursor::new(input), DecodeSession::with_sink(NullSink), None, None).unwrap();
        assert_eq!(report.status(), DecodeStatus::Incomplete);
        assert_eq!(report.image.as_slice(), &[0xDE, 0xAD]);
    }

// # ✅ 2. Progress

    #[test]
    fn decode_progress_is_increasing_and_ends_at_100() {
        let hex = encode(0, &test_data(4096), &EncodeConfig::new(16));
        let total = hex.len() as u64;

        let mut seen = Vec::new();
        let mut cb = |p: u8| seen.push(p);
        read_hex(Cursor::new(&hex), DecodeSession::with_sink(NullSink), Some(total), Some(&mut cb)).unwrap();

        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0] < w[1]), "{seen:?}");
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn encode_progress_is_increasing_and_ends_at_100() {
        let data = test_data(10_000);
        let enc = HexEncoder::from_slice(0x1000, &data, &EncodeConfig::default()).unwrap();

        let mut seen = Vec::new();
        let mut cb = |p: u8| seen.push(p);
        write_hex(std::io::sink(), enc, Some(&mut cb)).unwrap();

        assert!(seen.windows(2).all(|w| w[0] < w[1]), "{seen:?}");
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn tracker_suppresses_repeats() {
        let mut seen = Vec::new();
        {
            let mut cb = |p: u8| seen.push(p);
            let mut t = ProgressTracker::new(Some(&mut cb));
            t.update(1, 1000);
            t.update(2, 1000);
            t.update(500, 1000);
            t.update(400, 1000);
            t.update(1000, 1000);
            assert_eq!(t.last(), Some(100));
        }
        assert_eq!(seen, vec![0, 50, 100]);
    }

    #[test]
    fn tracker_without_callback_is_inert() {
        let mut t = ProgressTracker::new(None);
        t.update(5, 10);
        assert_eq!(t.last(), None);
    }

// # ✅ 3. File helpers

    #[test]
    fn file_round_trip() {
        let hex_path = temp_path("rt.hex");
        let bin_path = temp_path("rt.bin");
        let data = test_data(5000);

        let lines = write_hex_file(&hex_path, TEST_ADDRESS, &data, &EncodeConfig::default(), None).unwrap();
        assert!(lines > 0);

        let report = read_hex_file(&hex_path, &DecodeConfig::default(), NullSink, None).unwrap();
        assert!(report.is_success());
        write_binary_file(&bin_path, &report.image).unwrap();
        assert_eq!(read_binary_file(&bin_path).unwrap(), data);

        let _ = std::fs::remove_file(&hex_path);
        let _ = std::fs::remove_file(&bin_path);
    }

    #[test]
    fn empty_image_writes_empty_binary() {
        let bin_path = temp_path("empty.bin");
        write_binary_file(&bin_path, &MemoryBuffer::new()).unwrap();
        assert!(read_binary_file(&bin_path).unwrap().is_empty());
        let _ = std::fs::remove_file(&bin_path);
    }

    #[test]
    fn missing_input_is_a_fatal_io_error() {
        let err = read_hex_file(temp_path("missing.hex"), &DecodeConfig::default(), NullSink, None).unwrap_err();
        assert!(matches!(err, HexError::Io(_)));
        assert!(err.is_fatal());

        assert!(matches!(read_binary_file(temp_path("missing.bin")), Err(HexError::Io(_))));
    }

    #[test]
    fn bad_config_fails_before_touching_the_file() {
        let path = temp_path("never.hex");
        let err = write_hex_file(&path, 0, &[1], &EncodeConfig::new(0), None).unwrap_err();
        assert!(matches!(err, HexError::Encode(_)));
        assert!(err.is_fatal());
        assert!(!path.exists());
    }
}
