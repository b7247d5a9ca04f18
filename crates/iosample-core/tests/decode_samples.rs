use iosample_core::{
    IoLine, IoSample, IoValue, QueryError, SampleError, ValueKind, parse_io_sample,
    parse_optional_io_sample,
};

const INVALID_IO_DATA: [u8; 4] = [0x00, 0x01, 0x02, 0x03];

// DIO0, DIO4 and DIO9 are digital (high, low, high). DIO1 and DIO3 are ADC
// inputs (524 and 250) and the supply voltage reads 1250.
const IO_DATA_ONLY_DIGITAL: [u8; 6] = [0x01, 0x02, 0x11, 0x00, 0x02, 0x01];
const IO_DATA_ONLY_ANALOG: [u8; 10] = [0x01, 0x00, 0x00, 0x8A, 0x02, 0x0C, 0x00, 0xFA, 0x04, 0xE2];
const IO_DATA_MIXED: [u8; 12] = [
    0x01, 0x02, 0x11, 0x8A, 0x02, 0x01, 0x02, 0x0C, 0x00, 0xFA, 0x04, 0xE2,
];

const DIGITAL_MASK: u16 = 0x0211;
const ANALOG_MASK: u8 = 0x8A;
const DIO1_ANALOG_VALUE: u16 = 524;
const DIO3_ANALOG_VALUE: u16 = 250;
const POWER_SUPPLY_VALUE: u16 = 1250;

fn expected_digital(line: IoLine) -> Option<IoValue> {
    match line {
        IoLine::Dio0Ad0 => Some(IoValue::High),
        IoLine::Dio4Ad4 => Some(IoValue::Low),
        IoLine::Dio9 => Some(IoValue::High),
        _ => None,
    }
}

fn expected_analog(line: IoLine) -> Option<u16> {
    match line {
        IoLine::Dio1Ad1 => Some(DIO1_ANALOG_VALUE),
        IoLine::Dio3Ad3 => Some(DIO3_ANALOG_VALUE),
        _ => None,
    }
}

fn assert_digital_lines(sample: &IoSample) {
    assert_eq!(sample.digital_mask(), DIGITAL_MASK);
    assert!(sample.has_digital_values());
    for line in IoLine::ALL {
        match expected_digital(line) {
            Some(value) => {
                assert!(sample.has_digital_value(line), "{line}");
                assert_eq!(sample.digital_value(line), Ok(value));
                assert_eq!(sample.digital_values().get(&line), Some(&value));
            }
            None => assert_no_digital(sample, line),
        }
    }
}

fn assert_analog_lines(sample: &IoSample) {
    assert_eq!(sample.analog_mask(), ANALOG_MASK);
    assert!(sample.has_analog_values());
    for line in IoLine::ALL {
        match expected_analog(line) {
            Some(value) => {
                assert!(sample.has_analog_value(line), "{line}");
                assert_eq!(sample.analog_value(line), Ok(value));
                assert_eq!(sample.analog_values().get(&line), Some(&value));
            }
            None => assert_no_analog(sample, line),
        }
    }
    assert!(sample.has_power_supply_value());
    assert_eq!(sample.power_supply_value(), Ok(POWER_SUPPLY_VALUE));
}

fn assert_no_digital(sample: &IoSample, line: IoLine) {
    assert!(!sample.has_digital_value(line), "{line}");
    assert_eq!(
        sample.digital_value(line),
        Err(QueryError::LineNotPresent {
            line,
            kind: ValueKind::Digital
        })
    );
    assert_eq!(sample.digital_values().get(&line), None);
}

fn assert_no_analog(sample: &IoSample, line: IoLine) {
    assert!(!sample.has_analog_value(line), "{line}");
    assert_eq!(
        sample.analog_value(line),
        Err(QueryError::LineNotPresent {
            line,
            kind: ValueKind::Analog
        })
    );
    assert_eq!(sample.analog_values().get(&line), None);
}

#[test]
fn missing_payload_is_rejected() {
    let err = parse_optional_io_sample(None).unwrap_err();
    assert_eq!(err, SampleError::MissingPayload);
}

#[test]
fn invalid_payload_is_rejected() {
    let err = parse_io_sample(&INVALID_IO_DATA).unwrap_err();
    assert!(matches!(err, SampleError::TooShort { .. }));
}

#[test]
fn digital_values_from_digital_data() {
    let sample = parse_io_sample(&IO_DATA_ONLY_DIGITAL).unwrap();
    assert_digital_lines(&sample);
}

#[test]
fn analog_values_from_digital_data() {
    let sample = parse_io_sample(&IO_DATA_ONLY_DIGITAL).unwrap();
    assert_eq!(sample.analog_mask(), 0);
    assert!(!sample.has_analog_values());
    for line in IoLine::ALL {
        assert_no_analog(&sample, line);
    }
}

#[test]
fn power_supply_from_digital_data() {
    let sample = parse_io_sample(&IO_DATA_ONLY_DIGITAL).unwrap();
    assert!(!sample.has_power_supply_value());
    assert_eq!(
        sample.power_supply_value(),
        Err(QueryError::PowerSupplyUnavailable)
    );
}

#[test]
fn digital_values_from_analog_data() {
    let sample = parse_io_sample(&IO_DATA_ONLY_ANALOG).unwrap();
    assert_eq!(sample.digital_mask(), 0);
    assert!(!sample.has_digital_values());
    for line in IoLine::ALL {
        assert_no_digital(&sample, line);
    }
}

#[test]
fn analog_values_from_analog_data() {
    let sample = parse_io_sample(&IO_DATA_ONLY_ANALOG).unwrap();
    assert_analog_lines(&sample);
}

#[test]
fn digital_and_analog_values_from_mixed_data() {
    let sample = parse_io_sample(&IO_DATA_MIXED).unwrap();
    assert_digital_lines(&sample);
    assert_analog_lines(&sample);
}

#[test]
fn mixed_data_agrees_with_separate_samples() {
    let mixed = parse_io_sample(&IO_DATA_MIXED).unwrap();
    let digital = parse_io_sample(&IO_DATA_ONLY_DIGITAL).unwrap();
    let analog = parse_io_sample(&IO_DATA_ONLY_ANALOG).unwrap();
    assert_eq!(mixed.digital_values(), digital.digital_values());
    assert_eq!(mixed.analog_values(), analog.analog_values());
    assert_eq!(mixed.power_supply_value(), analog.power_supply_value());
}

#[test]
fn masks_match_map_membership() {
    for payload in [&IO_DATA_ONLY_DIGITAL[..], &IO_DATA_ONLY_ANALOG[..], &IO_DATA_MIXED[..]] {
        let sample = parse_io_sample(payload).unwrap();
        let digital_bits = sample
            .digital_values()
            .keys()
            .fold(0u16, |mask, line| mask | (1 << line.index()));
        assert_eq!(digital_bits, sample.digital_mask());

        let supply_bit = if sample.has_power_supply_value() { 0x80 } else { 0 };
        let analog_bits = sample
            .analog_values()
            .keys()
            .fold(supply_bit, |mask: u8, line| mask | (1 << line.index()));
        assert_eq!(analog_bits, sample.analog_mask());
    }
}

#[test]
fn decoding_is_idempotent() {
    let first = parse_io_sample(&IO_DATA_MIXED).unwrap();
    let second = parse_io_sample(&IO_DATA_MIXED).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn sample_outlives_input_buffer() {
    let sample = {
        let buffer = IO_DATA_MIXED.to_vec();
        IoSample::try_from(buffer.as_slice()).unwrap()
    };
    assert_eq!(sample.power_supply_value(), Ok(POWER_SUPPLY_VALUE));
}
