use crate::decode::{DecodeConfig, DecodeError, TimeSeries};

/// Output of a single decode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decoded {
    pub series: TimeSeries,
    /// Rate used to build the time axis; `None` when the format has no notion of one.
    pub sampling_rate: Option<f64>,
}

impl Decoded {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Something that can turn a whole file into a time series.
pub trait Decoder: Sync {
    fn decode(&self, input: &[u8], config: &DecodeConfig) -> Result<Decoded, DecodeError>;
}
