//! Decode-side address translation.

pub mod translator;

pub use translator::{AddressState, AddressTranslator, RecordEvent};
