use crate::decode::DecodeError;

/// One named sequence of samples sharing the series' time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    /// Input channel number (CSV column / JSON `ch{n}`).
    pub index: u32,
    pub name: String,
    pub values: Vec<f64>,
}

impl Channel {
    pub fn new(index: u32, values: Vec<f64>) -> Self {
        Self {
            index,
            name: channel_label(index),
            values,
        }
    }
}

pub fn channel_label(index: u32) -> String {
    format!("Channel {index}")
}

/// Decoded recording: a time axis in seconds plus equally long channels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    time: Vec<f64>,
    channels: Vec<Channel>,
}

impl TimeSeries {
    pub fn new(time: Vec<f64>, channels: Vec<Channel>) -> Result<Self, DecodeError> {
        for channel in &channels {
            if channel.values.len() != time.len() {
                return Err(DecodeError::LengthMismatch {
                    channel: channel.name.clone(),
                    expected: time.len(),
                    actual: channel.values.len(),
                });
            }
        }
        if channels.is_empty() {
            return Ok(Self::empty());
        }
        Ok(Self { time, channels })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn last_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    /// Index range of the samples whose time falls inside `[start, end]`.
    pub fn window_indices(&self, start: f64, end: f64) -> std::ops::Range<usize> {
        let lo = self.time.partition_point(|&t| t < start);
        let hi = self.time.partition_point(|&t| t <= end);
        lo..hi.max(lo)
    }
}
