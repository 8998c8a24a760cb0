use std::env;
use std::io::Write;

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde_json::json;

use ihex_core::diagnostics::LogSink;
use ihex_core::stream::{
    read_binary_file, read_hex_file, write_binary_file, write_hex_file, DecodeConfig, DecodeReport,
    DecodeStatus, EncodeConfig,
};
use ihex_core::telemetry::RecordCounters;

fn usage(prog: &str) {
    println!("ihex - Intel HEX <-> binary converter");
    println!();
    println!("Usage:");
    println!("  {} hex2bin <in.hex> <out.bin>", prog);
    println!("  {} bin2hex <in.bin> <out.hex> [--address <hex>] [--line-bytes <n>]", prog);
    println!("  {} info <in.hex> [more.hex ...]", prog);
    println!();
    println!("--address is the load address of the binary (hex, with or without 0x).");
    println!("--line-bytes is the payload size of each data record (1..=255, default 32).");
    println!("Set RUST_LOG=debug for per-record tracing.");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("ihex");

    // No subcommand is a help request, not an error
    let Some(cmd) = args.get(1) else {
        usage(prog);
        return Ok(());
    };

    match cmd.as_str() {
        "hex2bin" => hex2bin(&args[2..]),
        "bin2hex" => bin2hex(&args[2..]),
        "info" => info_cmd(&args[2..]),
        "-h" | "--help" | "help" => {
            usage(prog);
            Ok(())
        }
        other => {
            usage(prog);
            bail!("unknown command: {}", other)
        }
    }
}

/// Progress printer for stderr; finishes the line at 100%.
fn progress_printer(label: &'static str) -> impl FnMut(u8) {
    move |p| {
        eprint!("\r{}: {:3}%", label, p);
        if p >= 100 {
            eprintln!();
        }
        let _ = std::io::stderr().flush();
    }
}

fn report_status(path: &str, report: &DecodeReport) {
    match report.status() {
        DecodeStatus::Clean => debug!("{}: decoded cleanly", path),
        DecodeStatus::DecodedWithWarnings => warn!(
            "{}: decoded with warnings ({} problem records)",
            path,
            report.counters.problems()
        ),
        DecodeStatus::Incomplete => warn!("{}: no end-of-file record, image may be incomplete", path),
    }
}

fn hex2bin(args: &[String]) -> Result<()> {
    let [input, output] = args else {
        bail!("hex2bin expects <in.hex> <out.bin>");
    };

    let mut progress = progress_printer("decoding");
    let report = read_hex_file(input, &DecodeConfig::default(), LogSink, Some(&mut progress))
        .with_context(|| format!("cannot decode {}", input))?;
    report_status(input, &report);

    write_binary_file(output, &report.image).with_context(|| format!("cannot write {}", output))?;
    match report.image.start_address() {
        Some(start) => info!("wrote {} bytes (image at 0x{:08x}) to {}", report.image.len(), start, output),
        None => info!("no data records; wrote empty {}", output),
    }
    Ok(())
}

fn parse_address(s: &str) -> Result<u64> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16).with_context(|| format!("invalid address: {}", s))
}

fn bin2hex(args: &[String]) -> Result<()> {
    let (input, output) = match args {
        [i, o, ..] => (i, o),
        _ => bail!("bin2hex expects <in.bin> <out.hex>"),
    };

    let mut address = 0u64;
    let mut config = EncodeConfig::default();

    let mut opts = args[2..].iter();
    while let Some(opt) = opts.next() {
        let value = opts.next().with_context(|| format!("{} needs a value", opt))?;
        match opt.as_str() {
            "--address" => address = parse_address(value)?,
            "--line-bytes" => {
                config.max_line_bytes = value
                    .parse()
                    .with_context(|| format!("invalid line byte count: {}", value))?;
            }
            other => bail!("unknown option: {}", other),
        }
    }
    config.validate().context("invalid encode settings")?;

    let data = read_binary_file(input).with_context(|| format!("cannot read {}", input))?;
    debug!("{}: {} bytes, load address 0x{:08x}", input, data.len(), address);

    let mut progress = progress_printer("encoding");
    let lines = write_hex_file(output, address, &data, &config, Some(&mut progress))
        .with_context(|| format!("cannot encode {}", output))?;
    info!("wrote {} records to {}", lines, output);
    Ok(())
}

fn info_cmd(paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        bail!("info expects at least one <in.hex>");
    }

    let mut total = RecordCounters::default();
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let report = read_hex_file(path, &DecodeConfig::default(), LogSink, None)
            .with_context(|| format!("cannot decode {}", path))?;
        report_status(path, &report);

        files.push(json!({
            "path": path,
            "status": format!("{:?}", report.status()),
            "start": report.image.start_address(),
            "end": report.image.end_address(),
            "start_linear_address": report.start_linear_address,
            "start_segment_address": report.start_segment_address,
            "records": report.counters.total_records(),
            "counters": report.counters,
        }));
        total += report.counters;
    }

    let summary = json!({ "files": files, "total": total });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
