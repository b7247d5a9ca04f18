use thiserror::Error;
use tracing::{debug, warn};

use crate::sample::{IoSample, parse_io_sample};
use crate::source::{SampleEvent, SampleSource, SourceError};
use crate::{AnalogReading, DecodeReport, DigitalReading, Rejection, SampleSummary, make_stub_report};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode every sample of `source` into a report.
///
/// Samples that fail to decode are recorded as rejections and do not stop
/// the run; source errors do.
///
/// # Examples
/// ```
/// use iosample_core::{HexSource, decode_source};
///
/// let source = HexSource::from_lines(["01 02 11 00 02 01", "00 01 02 03"]);
/// let report = decode_source("inline", source)?;
/// assert_eq!(report.samples.len(), 1);
/// assert_eq!(report.rejected.len(), 1);
/// assert_eq!(report.rejected[0].origin, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_source<S: SampleSource>(input: &str, mut source: S) -> Result<DecodeReport, DecodeError> {
    let mut report = make_stub_report(input);

    while let Some(SampleEvent { origin, data }) = source.next_sample()? {
        report.input.samples_total += 1;
        match parse_io_sample(&data) {
            Ok(sample) => {
                debug!(origin, %sample, "sample decoded");
                report.samples.push(summarize(origin, &sample));
            }
            Err(err) => {
                warn!(origin, error = %err, "sample rejected");
                report.rejected.push(Rejection {
                    origin,
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn summarize(origin: usize, sample: &IoSample) -> SampleSummary {
    SampleSummary {
        origin,
        sample_sets: sample.sample_sets(),
        digital_mask: sample.digital_mask(),
        analog_mask: sample.analog_mask(),
        digital: sample
            .digital_values()
            .iter()
            .map(|(line, value)| DigitalReading {
                line: line.name().to_string(),
                index: line.index(),
                value: *value,
            })
            .collect(),
        analog: sample
            .analog_values()
            .iter()
            .map(|(line, value)| AnalogReading {
                line: line.name().to_string(),
                index: line.index(),
                value: *value,
            })
            .collect(),
        power_supply: sample.power_supply_value().ok(),
    }
}
