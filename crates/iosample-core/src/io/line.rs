use std::fmt;

use serde::{Deserialize, Serialize};

/// Addressable I/O line of the module.
///
/// The discriminant is the bit index used by the digital and analog masks of
/// an IO sample; it is part of the wire format and must never change.
///
/// # Examples
/// ```
/// use iosample_core::IoLine;
///
/// assert_eq!(IoLine::Dio9.index(), 9);
/// assert_eq!(IoLine::from_index(10), Some(IoLine::Dio10Pwm0));
/// assert_eq!(IoLine::Dio10Pwm0.to_string(), "DIO10/PWM0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IoLine {
    Dio0Ad0 = 0,
    Dio1Ad1 = 1,
    Dio2Ad2 = 2,
    Dio3Ad3 = 3,
    Dio4Ad4 = 4,
    Dio5Ad5 = 5,
    Dio6 = 6,
    Dio7 = 7,
    Dio8 = 8,
    Dio9 = 9,
    Dio10Pwm0 = 10,
    Dio11Pwm1 = 11,
    Dio12 = 12,
    Dio13 = 13,
    Dio14 = 14,
    Dio15 = 15,
    Dio16 = 16,
    Dio17 = 17,
    Dio18 = 18,
    Dio19 = 19,
}

impl IoLine {
    /// Every line, in ascending bit-index order.
    pub const ALL: [IoLine; 20] = [
        IoLine::Dio0Ad0,
        IoLine::Dio1Ad1,
        IoLine::Dio2Ad2,
        IoLine::Dio3Ad3,
        IoLine::Dio4Ad4,
        IoLine::Dio5Ad5,
        IoLine::Dio6,
        IoLine::Dio7,
        IoLine::Dio8,
        IoLine::Dio9,
        IoLine::Dio10Pwm0,
        IoLine::Dio11Pwm1,
        IoLine::Dio12,
        IoLine::Dio13,
        IoLine::Dio14,
        IoLine::Dio15,
        IoLine::Dio16,
        IoLine::Dio17,
        IoLine::Dio18,
        IoLine::Dio19,
    ];

    /// Bit index of the line inside the sample masks.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Look up a line by its bit index.
    pub fn from_index(index: u8) -> Option<IoLine> {
        Self::ALL.get(index as usize).copied()
    }

    /// Human-readable pin name (e.g. `DIO0/AD0`).
    pub fn name(self) -> &'static str {
        match self {
            IoLine::Dio0Ad0 => "DIO0/AD0",
            IoLine::Dio1Ad1 => "DIO1/AD1",
            IoLine::Dio2Ad2 => "DIO2/AD2",
            IoLine::Dio3Ad3 => "DIO3/AD3",
            IoLine::Dio4Ad4 => "DIO4/AD4",
            IoLine::Dio5Ad5 => "DIO5/AD5",
            IoLine::Dio6 => "DIO6",
            IoLine::Dio7 => "DIO7",
            IoLine::Dio8 => "DIO8",
            IoLine::Dio9 => "DIO9",
            IoLine::Dio10Pwm0 => "DIO10/PWM0",
            IoLine::Dio11Pwm1 => "DIO11/PWM1",
            IoLine::Dio12 => "DIO12",
            IoLine::Dio13 => "DIO13",
            IoLine::Dio14 => "DIO14",
            IoLine::Dio15 => "DIO15",
            IoLine::Dio16 => "DIO16",
            IoLine::Dio17 => "DIO17",
            IoLine::Dio18 => "DIO18",
            IoLine::Dio19 => "DIO19",
        }
    }

    /// AT command that configures the line mode on the device.
    pub fn config_at_command(self) -> &'static str {
        match self {
            IoLine::Dio0Ad0 => "D0",
            IoLine::Dio1Ad1 => "D1",
            IoLine::Dio2Ad2 => "D2",
            IoLine::Dio3Ad3 => "D3",
            IoLine::Dio4Ad4 => "D4",
            IoLine::Dio5Ad5 => "D5",
            IoLine::Dio6 => "D6",
            IoLine::Dio7 => "D7",
            IoLine::Dio8 => "D8",
            IoLine::Dio9 => "D9",
            IoLine::Dio10Pwm0 => "P0",
            IoLine::Dio11Pwm1 => "P1",
            IoLine::Dio12 => "P2",
            IoLine::Dio13 => "P3",
            IoLine::Dio14 => "P4",
            IoLine::Dio15 => "P5",
            IoLine::Dio16 => "P6",
            IoLine::Dio17 => "P7",
            IoLine::Dio18 => "P8",
            IoLine::Dio19 => "P9",
        }
    }

    /// AT command that sets the PWM duty cycle, for PWM-capable lines.
    pub fn pwm_at_command(self) -> Option<&'static str> {
        match self {
            IoLine::Dio10Pwm0 => Some("M0"),
            IoLine::Dio11Pwm1 => Some("M1"),
            _ => None,
        }
    }

    pub fn has_pwm_capability(self) -> bool {
        self.pwm_at_command().is_some()
    }

    pub(crate) fn bit(self) -> u32 {
        1u32 << self.index()
    }
}

impl fmt::Display for IoLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::IoLine;

    #[test]
    fn indices_match_table_position() {
        for (position, line) in IoLine::ALL.iter().enumerate() {
            assert_eq!(line.index() as usize, position);
            assert_eq!(IoLine::from_index(position as u8), Some(*line));
        }
    }

    #[test]
    fn from_index_out_of_range() {
        assert_eq!(IoLine::from_index(20), None);
        assert_eq!(IoLine::from_index(u8::MAX), None);
    }

    #[test]
    fn ordering_follows_bit_index() {
        assert!(IoLine::Dio0Ad0 < IoLine::Dio9);
        assert!(IoLine::Dio9 < IoLine::Dio10Pwm0);
    }

    #[test]
    fn only_pwm_lines_have_duty_cycle_command() {
        let pwm: Vec<_> = IoLine::ALL
            .iter()
            .filter(|line| line.has_pwm_capability())
            .collect();
        assert_eq!(pwm, [&IoLine::Dio10Pwm0, &IoLine::Dio11Pwm1]);
        assert_eq!(IoLine::Dio11Pwm1.pwm_at_command(), Some("M1"));
        assert_eq!(IoLine::Dio12.pwm_at_command(), None);
    }

    #[test]
    fn names_and_commands() {
        assert_eq!(IoLine::Dio4Ad4.name(), "DIO4/AD4");
        assert_eq!(IoLine::Dio4Ad4.config_at_command(), "D4");
        assert_eq!(IoLine::Dio19.config_at_command(), "P9");
    }
}
