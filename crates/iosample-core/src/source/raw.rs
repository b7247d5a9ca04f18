use std::fs;
use std::path::Path;

use super::{SampleEvent, SampleSource, SourceError};

/// Source backed by a binary file holding exactly one sample.
pub struct RawFileSource {
    data: Option<Vec<u8>>,
}

impl RawFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let data = fs::read(path)?;
        Ok(Self::from_bytes(data))
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data: Some(data) }
    }
}

impl SampleSource for RawFileSource {
    fn next_sample(&mut self) -> Result<Option<SampleEvent>, SourceError> {
        Ok(self.data.take().map(|data| SampleEvent { origin: 1, data }))
    }
}
