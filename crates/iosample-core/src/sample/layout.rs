pub const SAMPLE_SETS_OFFSET: usize = 0;
pub const DIGITAL_MASK_OFFSET: usize = 1;
pub const ANALOG_MASK_OFFSET: usize = 3;
pub const HEADER_LEN: usize = 4;

pub const DIGITAL_VALUES_LEN: usize = 2;
pub const ANALOG_VALUE_LEN: usize = 2;

pub const ANALOG_MASK_BITS: u8 = 8;
pub const POWER_SUPPLY_BIT: u8 = 7;

pub const MIN_LEN: usize = HEADER_LEN + 1;
