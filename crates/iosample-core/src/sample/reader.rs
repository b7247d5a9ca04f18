use super::error::SampleError;
use super::layout;

pub struct SampleReader<'a> {
    payload: &'a [u8],
}

impl<'a> SampleReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), SampleError> {
        if self.payload.len() < needed {
            return Err(SampleError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, SampleError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(SampleError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, offset: usize) -> Result<u16, SampleError> {
        let end = offset + 2;
        match self.payload.get(offset..end) {
            Some(&[hi, lo]) => Ok(u16::from_be_bytes([hi, lo])),
            _ => Err(SampleError::TooShort {
                needed: end,
                actual: self.payload.len(),
            }),
        }
    }
}

/// Total length implied by the masks: header, optional digital value field
/// and one 16-bit reading per analog mask bit.
pub fn declared_len(digital_mask: u16, analog_mask: u8) -> usize {
    let digital = if digital_mask != 0 {
        layout::DIGITAL_VALUES_LEN
    } else {
        0
    };
    layout::HEADER_LEN + digital + analog_mask.count_ones() as usize * layout::ANALOG_VALUE_LEN
}
