use serde::Deserialize;
use serde_json::Value;

use crate::decode::normalize::{json_sample, RowCollector};
use crate::decode::source::{Decoded, Decoder};
use crate::decode::{ChannelSelector, DecodeConfig, DecodeError};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Top-level shape of a JSON recording. Fields stay loosely typed so a wrong type
/// degrades to "absent" instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct Recording {
    #[serde(rename = "samplingRate", default)]
    sampling_rate: Option<Value>,
    #[serde(default)]
    channel: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

impl Recording {
    fn rate(&self, config: &DecodeConfig) -> f64 {
        self.sampling_rate
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or_else(|| config.effective_rate())
    }

    /// Positive whole number; `2` and `2.0` both select `ch2`.
    fn channel(&self) -> Option<u32> {
        self.channel
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|c| c.fract() == 0.0 && *c >= 1.0 && *c <= f64::from(u32::MAX))
            .map(|c| c as u32)
    }
}

/// `{ samplingRate?, channel?, data: [{ counter, ch1, ch2, ... }] }`.
///
/// Time is `counter / samplingRate`; rows without a numeric counter never make it
/// into the series.
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, input: &[u8], config: &DecodeConfig) -> Result<Decoded, DecodeError> {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        let recording: Recording = serde_json::from_slice(input)?;
        let rate = recording.rate(config);

        let Some(data) = recording.data.as_ref().and_then(Value::as_array) else {
            log::debug!("json: no data array");
            return Ok(Decoded {
                series: Default::default(),
                sampling_rate: Some(rate),
            });
        };

        let channels = match &config.channels {
            ChannelSelector::Single { channel } => vec![recording.channel().unwrap_or(*channel)],
            ChannelSelector::Multi { channels } => channels.clone(),
        };
        let keys: Vec<String> = channels.iter().map(|c| format!("ch{c}")).collect();
        let single = !config.channels.is_multi();

        let mut rows = RowCollector::new(channels);
        for row in data {
            let Some(counter) = json_sample(row.get("counter")) else {
                rows.reject();
                continue;
            };
            let values: Vec<Option<f64>> = keys.iter().map(|k| json_sample(row.get(k))).collect();
            if single && values.iter().any(Option::is_none) {
                rows.reject();
                continue;
            }
            rows.push(counter / rate, values);
        }
        let series = rows.finish()?;

        log::debug!(
            "json: {} samples at {rate} Hz across {} channels",
            series.len(),
            series.channels().len()
        );
        Ok(Decoded {
            series,
            sampling_rate: Some(rate),
        })
    }
}
