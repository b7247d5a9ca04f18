use std::collections::BTreeMap;
use std::fmt;

use crate::io::{IoLine, IoValue};

use super::error::{QueryError, SampleError, ValueKind};
use super::parser::parse_io_sample;

/// Decoded IO sample.
///
/// Built once from a payload and read-only afterwards. Two accessor tiers
/// share the same tables: `digital_value`/`analog_value` fail on absent
/// lines, while `digital_values`/`analog_values` expose the maps directly so
/// a lookup for an absent line yields `None`.
///
/// # Examples
/// ```
/// use iosample_core::{IoLine, IoSample, IoValue};
///
/// let payload = [0x01, 0x02, 0x11, 0x00, 0x02, 0x01];
/// let sample = IoSample::try_from(&payload[..])?;
///
/// assert_eq!(sample.digital_mask(), 0x0211);
/// assert_eq!(sample.digital_value(IoLine::Dio9)?, IoValue::High);
/// assert!(sample.digital_value(IoLine::Dio1Ad1).is_err());
/// assert_eq!(sample.digital_values().get(&IoLine::Dio1Ad1), None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoSample {
    sample_sets: u8,
    digital_mask: u16,
    analog_mask: u8,
    digital_values: BTreeMap<IoLine, IoValue>,
    analog_values: BTreeMap<IoLine, u16>,
    power_supply_value: Option<u16>,
}

impl IoSample {
    pub(crate) fn from_parts(
        sample_sets: u8,
        digital_mask: u16,
        analog_mask: u8,
        digital_values: BTreeMap<IoLine, IoValue>,
        analog_values: BTreeMap<IoLine, u16>,
        power_supply_value: Option<u16>,
    ) -> Self {
        Self {
            sample_sets,
            digital_mask,
            analog_mask,
            digital_values,
            analog_values,
            power_supply_value,
        }
    }

    /// Sample-set count announced by the first payload byte.
    pub fn sample_sets(&self) -> u8 {
        self.sample_sets
    }

    pub fn digital_mask(&self) -> u16 {
        self.digital_mask
    }

    pub fn analog_mask(&self) -> u8 {
        self.analog_mask
    }

    pub fn has_digital_values(&self) -> bool {
        !self.digital_values.is_empty()
    }

    pub fn has_analog_values(&self) -> bool {
        !self.analog_values.is_empty()
    }

    pub fn has_power_supply_value(&self) -> bool {
        self.power_supply_value.is_some()
    }

    pub fn has_digital_value(&self, line: IoLine) -> bool {
        self.digital_values.contains_key(&line)
    }

    /// True when `line` carries an analog reading. The power-supply bit of
    /// the analog mask is not a line and never makes this true.
    pub fn has_analog_value(&self, line: IoLine) -> bool {
        self.analog_values.contains_key(&line)
    }

    /// Digital state of `line`.
    ///
    /// # Errors
    /// Returns `QueryError::LineNotPresent` when the line is not set in the
    /// digital mask.
    pub fn digital_value(&self, line: IoLine) -> Result<IoValue, QueryError> {
        self.digital_values
            .get(&line)
            .copied()
            .ok_or(QueryError::LineNotPresent {
                line,
                kind: ValueKind::Digital,
            })
    }

    /// Analog reading of `line`.
    ///
    /// # Errors
    /// Returns `QueryError::LineNotPresent` when the line is not set in the
    /// analog mask.
    pub fn analog_value(&self, line: IoLine) -> Result<u16, QueryError> {
        self.analog_values
            .get(&line)
            .copied()
            .ok_or(QueryError::LineNotPresent {
                line,
                kind: ValueKind::Analog,
            })
    }

    /// Supply voltage reading of the module.
    ///
    /// # Errors
    /// Returns `QueryError::PowerSupplyUnavailable` when the sample does not
    /// carry it.
    pub fn power_supply_value(&self) -> Result<u16, QueryError> {
        self.power_supply_value
            .ok_or(QueryError::PowerSupplyUnavailable)
    }

    pub fn digital_values(&self) -> &BTreeMap<IoLine, IoValue> {
        &self.digital_values
    }

    pub fn analog_values(&self) -> &BTreeMap<IoLine, u16> {
        &self.analog_values
    }
}

impl TryFrom<&[u8]> for IoSample {
    type Error = SampleError;

    fn try_from(payload: &[u8]) -> Result<Self, Self::Error> {
        parse_io_sample(payload)
    }
}

impl fmt::Display for IoSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = Vec::new();
        for (line, value) in &self.digital_values {
            entries.push(format!("{line}: {value}"));
        }
        for (line, value) in &self.analog_values {
            entries.push(format!("{line}: {value}"));
        }
        if let Some(value) = self.power_supply_value {
            entries.push(format!("Power supply value: {value}"));
        }
        write!(f, "{{{}}}", entries.join(", "))
    }
}
