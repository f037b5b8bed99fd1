use serde::{Deserialize, Serialize};

/// Rate assumed when the input does not declare one.
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 500.0;

/// Which input channels end up in the decoded series.
///
/// Channel `n` is CSV column `n` (column 0 being the row counter) and JSON field `ch{n}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChannelSelector {
    Single { channel: u32 },
    Multi { channels: Vec<u32> },
}

impl ChannelSelector {
    pub fn multi_default() -> Self {
        ChannelSelector::Multi {
            channels: vec![1, 2, 3],
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, ChannelSelector::Multi { .. })
    }
}

impl Default for ChannelSelector {
    fn default() -> Self {
        ChannelSelector::Single { channel: 1 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodeConfig {
    pub sampling_rate: f64,
    pub channels: ChannelSelector,
}

impl DecodeConfig {
    pub fn single(channel: u32) -> Self {
        Self {
            channels: ChannelSelector::Single {
                channel: channel.max(1),
            },
            ..Self::default()
        }
    }

    pub fn multi() -> Self {
        Self {
            channels: ChannelSelector::multi_default(),
            ..Self::default()
        }
    }

    /// Configured rate, falling back to the default for non-positive values.
    pub fn effective_rate(&self) -> f64 {
        if self.sampling_rate.is_finite() && self.sampling_rate > 0.0 {
            self.sampling_rate
        } else {
            DEFAULT_SAMPLING_RATE_HZ
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            sampling_rate: DEFAULT_SAMPLING_RATE_HZ,
            channels: ChannelSelector::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_single_channel_at_500_hz() {
        let config = DecodeConfig::default();
        assert_eq!(config.sampling_rate, 500.0);
        assert_eq!(config.channels, ChannelSelector::Single { channel: 1 });
    }

    #[test]
    fn non_positive_rate_falls_back() {
        let config = DecodeConfig {
            sampling_rate: 0.0,
            ..DecodeConfig::default()
        };
        assert_eq!(config.effective_rate(), DEFAULT_SAMPLING_RATE_HZ);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = DecodeConfig::multi();
        let text = serde_json::to_string(&config).unwrap();
        let back: DecodeConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
