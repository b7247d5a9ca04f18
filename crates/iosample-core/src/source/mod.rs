//! Sample sources.
//!
//! A source yields already-delimited sample payloads, each tagged with its
//! 1-based origin (text line, argument position or file). Sources own all
//! I/O; decoding happens in the analysis layer.

mod hex;
mod raw;

pub use hex::{HexSource, decode_hex_line};
pub use raw::RawFileSource;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEvent {
    pub origin: usize,
    pub data: Vec<u8>,
}

pub trait SampleSource {
    fn next_sample(&mut self) -> Result<Option<SampleEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex at line {origin}: {source}")]
    InvalidHex {
        origin: usize,
        #[source]
        source: HexError,
    },
}

/// Why a line of hex text could not be turned into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("no bytes on line")]
    Empty,
    #[error("token '{token}' must have an even number of hex digits")]
    OddDigits { token: String },
    #[error("unexpected character '{found}' in token '{token}'")]
    InvalidDigit { found: char, token: String },
}
