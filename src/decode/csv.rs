use csv::{ByteRecord, ReaderBuilder};

use crate::decode::normalize::{parse_sample, RowCollector};
use crate::decode::source::{Decoded, Decoder};
use crate::decode::{ChannelSelector, DecodeConfig, DecodeError};

/// Comma-separated text with a header row.
///
/// The header is skipped without being looked at. Column 0 is ignored; channel `n`
/// is read from column `n` and time comes from the row position and the configured
/// sampling rate.
pub struct CsvDecoder;

impl Decoder for CsvDecoder {
    fn decode(&self, input: &[u8], config: &DecodeConfig) -> Result<Decoded, DecodeError> {
        let rate = config.effective_rate();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let series = match &config.channels {
            ChannelSelector::Single { channel } => {
                let column = *channel as usize;
                let mut rows = RowCollector::new(vec![*channel]);
                for record in reader.byte_records() {
                    match record.ok().and_then(|r| field_sample(&r, column)) {
                        // Output index, so dropped rows leave no gap in the time axis.
                        Some(value) => rows.push(rows.len() as f64 / rate, vec![Some(value)]),
                        None => rows.reject(),
                    }
                }
                rows.finish()?
            }
            ChannelSelector::Multi { channels } => {
                let mut rows = RowCollector::new(channels.clone());
                for (index, record) in reader.byte_records().enumerate() {
                    let Ok(record) = record else {
                        rows.reject();
                        continue;
                    };
                    let values = channels
                        .iter()
                        .map(|&c| field_sample(&record, c as usize))
                        .collect();
                    rows.push(index as f64 / rate, values);
                }
                rows.finish()?
            }
        };

        log::debug!(
            "csv: {} samples across {} channels",
            series.len(),
            series.channels().len()
        );
        Ok(Decoded {
            series,
            sampling_rate: Some(rate),
        })
    }
}

fn field_sample(record: &ByteRecord, column: usize) -> Option<f64> {
    let raw = record.get(column)?;
    let text = std::str::from_utf8(raw).ok()?;
    parse_sample(text)
}
