use std::fmt;

use serde::{Deserialize, Serialize};

/// Digital state of a line.
///
/// A line that does not report a digital state has no `IoValue`; absence is
/// expressed by the caller's `Option`, never by a third variant.
///
/// # Examples
/// ```
/// use iosample_core::IoValue;
///
/// assert_eq!(IoValue::from_bit(true), IoValue::High);
/// assert_eq!(IoValue::Low.to_string(), "Low");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IoValue {
    Low,
    High,
}

impl IoValue {
    pub fn from_bit(set: bool) -> Self {
        if set { IoValue::High } else { IoValue::Low }
    }

    pub fn name(self) -> &'static str {
        match self {
            IoValue::Low => "Low",
            IoValue::High => "High",
        }
    }
}

impl fmt::Display for IoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::IoValue;

    #[test]
    fn from_bit_maps_both_states() {
        assert_eq!(IoValue::from_bit(false), IoValue::Low);
        assert_eq!(IoValue::from_bit(true), IoValue::High);
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&IoValue::High).unwrap();
        assert_eq!(json, "\"High\"");
    }
}
