use std::fmt;

use thiserror::Error;

use crate::io::IoLine;

/// Errors returned while decoding an IO sample payload.
///
/// # Examples
/// ```
/// use iosample_core::{SampleError, parse_io_sample};
///
/// let err = parse_io_sample(&[0x00, 0x01, 0x02, 0x03]).unwrap_err();
/// assert!(matches!(err, SampleError::TooShort { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("missing IO sample payload")]
    MissingPayload,
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}

/// Which value table a line query targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Digital,
    Analog,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Digital => f.write_str("digital"),
            ValueKind::Analog => f.write_str("analog"),
        }
    }
}

/// Errors returned by the single-value accessors of a decoded sample.
///
/// # Examples
/// ```
/// use iosample_core::{IoLine, QueryError, ValueKind};
///
/// let err = QueryError::LineNotPresent { line: IoLine::Dio9, kind: ValueKind::Analog };
/// assert_eq!(err.to_string(), "DIO9 has no analog value in this sample");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{line} has no {kind} value in this sample")]
    LineNotPresent { line: IoLine, kind: ValueKind },
    #[error("sample carries no power supply value")]
    PowerSupplyUnavailable,
}
