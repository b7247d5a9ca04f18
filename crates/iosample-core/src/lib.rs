//! IO sample decoding for XBee-style radio modules.
//!
//! The module reports its I/O lines in a compact binary record: a header
//! with digital and analog line masks, an optional digital state field and
//! one 16-bit reading per enabled analog line, the last of which may be the
//! module supply voltage. This crate turns such a record into an immutable
//! [`IoSample`] with typed per-line accessors.
//!
//! The workspace is layered the same way throughout: sources yield already
//! delimited payloads, the `sample` decoder (layout/reader/parser) turns each
//! payload into an `IoSample`, and the analysis layer aggregates results
//! into a deterministic [`DecodeReport`]. Decoding is pure; all I/O lives in
//! `source`.
//!
//! Invariants:
//! - Line bit indices are part of the wire format and never change.
//! - A decoded sample never changes after construction.
//! - Report ordering follows the source order, then the line index.
//!
//! # Examples
//! ```
//! use iosample_core::{IoLine, IoValue, parse_io_sample};
//!
//! let payload = [0x01, 0x02, 0x11, 0x8A, 0x02, 0x01, 0x02, 0x0C, 0x00, 0xFA, 0x04, 0xE2];
//! let sample = parse_io_sample(&payload)?;
//! assert_eq!(sample.digital_value(IoLine::Dio0Ad0)?, IoValue::High);
//! assert_eq!(sample.analog_value(IoLine::Dio3Ad3)?, 250);
//! assert_eq!(sample.power_supply_value()?, 1250);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod io;
mod sample;
mod source;

pub use analysis::{DecodeError, decode_source};
pub use io::{IoLine, IoValue};
pub use sample::{
    IoSample, QueryError, SampleError, ValueKind, parse_io_sample, parse_optional_io_sample,
};
pub use source::{
    HexError, HexSource, RawFileSource, SampleEvent, SampleSource, SourceError, decode_hex_line,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decode report with deterministic ordering.
///
/// # Examples
/// ```
/// use iosample_core::make_stub_report;
///
/// let report = make_stub_report("samples.hex");
/// assert_eq!(report.report_version, iosample_core::REPORT_VERSION);
/// assert!(report.samples.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input metadata.
    pub input: InputInfo,
    /// Decoded samples in source order.
    pub samples: Vec<SampleSummary>,
    /// Samples that failed to decode, in source order.
    pub rejected: Vec<Rejection>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input label as provided to the decoder (path or `args`).
    pub path: String,
    /// Number of samples the source yielded, decoded or not.
    pub samples_total: u64,
}

/// One decoded sample.
///
/// # Examples
/// ```
/// use iosample_core::SampleSummary;
///
/// let summary = SampleSummary {
///     origin: 1,
///     sample_sets: 1,
///     digital_mask: 0,
///     analog_mask: 0x80,
///     digital: Vec::new(),
///     analog: Vec::new(),
///     power_supply: Some(1250),
/// };
/// let json = serde_json::to_value(&summary).unwrap();
/// assert_eq!(json["power_supply"], 1250);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    /// 1-based position of the sample in its source.
    pub origin: usize,
    pub sample_sets: u8,
    pub digital_mask: u16,
    pub analog_mask: u8,
    /// Digital states ordered by line index.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub digital: Vec<DigitalReading>,
    /// Analog readings ordered by line index.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analog: Vec<AnalogReading>,
    /// Supply voltage reading, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_supply: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalReading {
    pub line: String,
    pub index: u8,
    pub value: IoValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalogReading {
    pub line: String,
    pub index: u8,
    pub value: u16,
}

/// A sample that failed to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    pub origin: usize,
    pub message: String,
}

/// Build an empty report for `input`.
pub fn make_stub_report(input: &str) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "iosample".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input.to_string(),
            samples_total: 0,
        },
        samples: vec![],
        rejected: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_omits_absent_fields() {
        let summary = SampleSummary {
            origin: 1,
            sample_sets: 1,
            digital_mask: 0,
            analog_mask: 0,
            digital: vec![],
            analog: vec![],
            power_supply: None,
        };

        let value = serde_json::to_value(&summary).expect("summary json");
        assert!(value.get("digital").is_none());
        assert!(value.get("analog").is_none());
        assert!(value.get("power_supply").is_none());
        assert_eq!(value["digital_mask"], 0);
    }

    #[test]
    fn digital_reading_serializes_value_name() {
        let reading = DigitalReading {
            line: IoLine::Dio9.name().to_string(),
            index: IoLine::Dio9.index(),
            value: IoValue::High,
        };
        let value = serde_json::to_value(&reading).expect("reading json");
        assert_eq!(value["line"], "DIO9");
        assert_eq!(value["index"], 9);
        assert_eq!(value["value"], "High");
    }
}
