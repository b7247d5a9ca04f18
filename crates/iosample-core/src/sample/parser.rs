use std::collections::BTreeMap;

use tracing::debug;

use crate::io::{IoLine, IoValue};

use super::error::SampleError;
use super::layout;
use super::model::IoSample;
use super::reader::{SampleReader, declared_len};

/// Decode one IO sample payload.
///
/// The payload must hold at least the fields its masks declare; trailing
/// bytes are ignored.
///
/// # Examples
/// ```
/// use iosample_core::{IoLine, parse_io_sample};
///
/// let payload = [0x01, 0x00, 0x00, 0x8A, 0x02, 0x0C, 0x00, 0xFA, 0x04, 0xE2];
/// let sample = parse_io_sample(&payload)?;
/// assert_eq!(sample.analog_value(IoLine::Dio1Ad1)?, 524);
/// assert_eq!(sample.power_supply_value()?, 1250);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Returns `SampleError::TooShort` when the payload is shorter than the
/// minimum sample or than the fields its masks declare.
pub fn parse_io_sample(payload: &[u8]) -> Result<IoSample, SampleError> {
    let reader = SampleReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let sample_sets = reader.read_u8(layout::SAMPLE_SETS_OFFSET)?;
    let digital_mask = reader.read_u16_be(layout::DIGITAL_MASK_OFFSET)?;
    let analog_mask = reader.read_u8(layout::ANALOG_MASK_OFFSET)?;
    reader.require_len(declared_len(digital_mask, analog_mask))?;

    let mut offset = layout::HEADER_LEN;
    let mut digital_values = BTreeMap::new();
    if digital_mask != 0 {
        let states = reader.read_u16_be(offset)?;
        for line in IoLine::ALL {
            if u32::from(digital_mask) & line.bit() == 0 {
                continue;
            }
            let high = u32::from(states) & line.bit() != 0;
            digital_values.insert(line, IoValue::from_bit(high));
        }
        offset += layout::DIGITAL_VALUES_LEN;
    }

    let mut analog_values = BTreeMap::new();
    let mut power_supply_value = None;
    for bit in 0..layout::ANALOG_MASK_BITS {
        if analog_mask & (1 << bit) == 0 {
            continue;
        }
        let value = reader.read_u16_be(offset)?;
        offset += layout::ANALOG_VALUE_LEN;
        if bit == layout::POWER_SUPPLY_BIT {
            power_supply_value = Some(value);
        } else if let Some(line) = IoLine::from_index(bit) {
            analog_values.insert(line, value);
        }
    }

    debug!(
        sample_sets,
        digital_mask,
        analog_mask,
        consumed = offset,
        trailing = payload.len() - offset,
        "decoded IO sample"
    );

    Ok(IoSample::from_parts(
        sample_sets,
        digital_mask,
        analog_mask,
        digital_values,
        analog_values,
        power_supply_value,
    ))
}

/// Decode a payload that may be absent.
///
/// # Errors
/// Returns `SampleError::MissingPayload` for `None`, otherwise the errors of
/// [`parse_io_sample`].
pub fn parse_optional_io_sample(payload: Option<&[u8]>) -> Result<IoSample, SampleError> {
    let payload = payload.ok_or(SampleError::MissingPayload)?;
    parse_io_sample(payload)
}
