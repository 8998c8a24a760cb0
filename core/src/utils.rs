use std::fmt;
use num_enum::TryFromPrimitive;

/// Debug name of a known enum value, or its raw value in hex.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Short printable form of a byte run for diagnostics.
pub fn fmt_bytes(b: &[u8]) -> String {
    format!("0x{}", hex::encode_upper(b))
}

/// Integer percentage of `done` over `total`, clamped to 100.
/// An unknown (zero) total reports 100.
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.saturating_mul(100) / total).min(100) as u8
}
