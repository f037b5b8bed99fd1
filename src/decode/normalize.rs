//! Row validation shared by every decoder.
//!
//! Decoders feed candidate rows (a time value plus one optional value per selected
//! channel) into a [`RowCollector`]. The collector then applies the lockstep policy:
//! - channels that never produced a valid value are pruned;
//! - a row survives only if every remaining channel has a value in it;
//! - rows are stable-sorted by time if they arrived out of order.
//!
//! The result always satisfies `values.len() == time.len()` for every channel.

use serde_json::Value;

use crate::decode::series::{Channel, TimeSeries};
use crate::decode::DecodeError;

/// Parse a text field as a finite sample value.
///
/// Only the leading number counts, so `"2.5 mV"` reads as `2.5`; a field that does
/// not start with a number is rejected.
pub fn parse_sample(field: &str) -> Option<f64> {
    let text = field.trim();
    text[..numeric_prefix_len(text)]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Length of the longest `[+-]digits[.digits][(e|E)[+-]digits]` prefix, or 0 when
/// there is no digit in the mantissa.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        // A bare "e" is not part of the number.
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}

/// Numeric JSON value as `f64`; strings, booleans and nulls are rejected.
pub fn json_sample(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| v.is_finite())
}

pub struct RowCollector {
    indices: Vec<u32>,
    time: Vec<f64>,
    rows: Vec<Vec<Option<f64>>>,
    rejected: usize,
}

impl RowCollector {
    pub fn new(indices: Vec<u32>) -> Self {
        Self {
            indices,
            time: Vec::new(),
            rows: Vec::new(),
            rejected: 0,
        }
    }

    /// Number of candidate rows accepted so far.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn push(&mut self, time: f64, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.indices.len());
        self.time.push(time);
        self.rows.push(values);
    }

    /// Count a row that was rejected before it became a candidate.
    pub fn reject(&mut self) {
        self.rejected += 1;
    }

    pub fn finish(self) -> Result<TimeSeries, DecodeError> {
        let present: Vec<usize> = (0..self.indices.len())
            .filter(|&col| self.rows.iter().any(|row| row[col].is_some()))
            .collect();
        if present.is_empty() {
            log::debug!(
                "no channel produced a valid sample ({} rows rejected)",
                self.rejected + self.rows.len()
            );
            return Ok(TimeSeries::empty());
        }

        let mut kept: Vec<(f64, Vec<f64>)> = self
            .time
            .iter()
            .zip(&self.rows)
            .filter_map(|(&t, row)| {
                let values: Option<Vec<f64>> = present.iter().map(|&col| row[col]).collect();
                values.map(|values| (t, values))
            })
            .collect();

        let dropped = self.rows.len() - kept.len() + self.rejected;
        if dropped > 0 {
            log::debug!("dropped {dropped} rows failing validation");
        }

        if kept.windows(2).any(|pair| pair[1].0 < pair[0].0) {
            log::debug!("time axis out of order; sorting {} rows", kept.len());
            kept.sort_by(|a, b| a.0.total_cmp(&b.0));
        }

        let mut time = Vec::with_capacity(kept.len());
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(kept.len()); present.len()];
        for (t, values) in kept {
            time.push(t);
            for (column, value) in columns.iter_mut().zip(values) {
                column.push(value);
            }
        }
        let channels = present
            .iter()
            .zip(columns)
            .map(|(&col, values)| Channel::new(self.indices[col], values))
            .collect();
        TimeSeries::new(time, channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sample_trims_and_rejects_garbage() {
        assert_eq!(parse_sample(" 4.0 "), Some(4.0));
        assert_eq!(parse_sample("-1e3"), Some(-1000.0));
        assert_eq!(parse_sample("abc"), None);
        assert_eq!(parse_sample(""), None);
        assert_eq!(parse_sample("inf"), None);
        assert_eq!(parse_sample("NaN"), None);
    }

    #[test]
    fn parse_sample_reads_leading_number() {
        assert_eq!(parse_sample("2.5 mV"), Some(2.5));
        assert_eq!(parse_sample("4.0abc"), Some(4.0));
        assert_eq!(parse_sample("-.5uV"), Some(-0.5));
        assert_eq!(parse_sample("7."), Some(7.0));
        assert_eq!(parse_sample("1e3x"), Some(1000.0));
        assert_eq!(parse_sample("1e"), Some(1.0));
        assert_eq!(parse_sample("2E-1,"), Some(0.2));
        assert_eq!(parse_sample("abc"), None);
        assert_eq!(parse_sample("-"), None);
        assert_eq!(parse_sample("."), None);
        assert_eq!(parse_sample("mV 2.5"), None);
    }

    #[test]
    fn json_sample_only_accepts_numbers() {
        let row = serde_json::json!({"a": 1.5, "b": "2", "c": null, "d": 3});
        assert_eq!(json_sample(row.get("a")), Some(1.5));
        assert_eq!(json_sample(row.get("b")), None);
        assert_eq!(json_sample(row.get("c")), None);
        assert_eq!(json_sample(row.get("d")), Some(3.0));
        assert_eq!(json_sample(row.get("missing")), None);
    }

    #[test]
    fn drops_rows_missing_a_present_channel() {
        let mut rows = RowCollector::new(vec![1, 2]);
        rows.push(0.0, vec![Some(1.0), Some(10.0)]);
        rows.push(1.0, vec![Some(2.0), None]);
        rows.push(2.0, vec![Some(3.0), Some(30.0)]);
        let series = rows.finish().unwrap();
        assert_eq!(series.time(), &[0.0, 2.0]);
        assert_eq!(series.channels()[0].values, vec![1.0, 3.0]);
        assert_eq!(series.channels()[1].values, vec![10.0, 30.0]);
    }

    #[test]
    fn prunes_channels_that_never_appear() {
        let mut rows = RowCollector::new(vec![1, 2, 3]);
        rows.push(0.0, vec![Some(1.0), None, None]);
        rows.push(1.0, vec![Some(2.0), None, None]);
        let series = rows.finish().unwrap();
        assert_eq!(series.channels().len(), 1);
        assert_eq!(series.channels()[0].index, 1);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn sorts_out_of_order_rows() {
        let mut rows = RowCollector::new(vec![1]);
        rows.push(2.0, vec![Some(20.0)]);
        rows.push(1.0, vec![Some(10.0)]);
        rows.push(3.0, vec![Some(30.0)]);
        let series = rows.finish().unwrap();
        assert_eq!(series.time(), &[1.0, 2.0, 3.0]);
        assert_eq!(series.channels()[0].values, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn nothing_valid_gives_empty_series() {
        let mut rows = RowCollector::new(vec![1]);
        rows.push(0.0, vec![None]);
        rows.reject();
        let series = rows.finish().unwrap();
        assert!(series.is_empty());
        assert!(series.channels().is_empty());
    }
}
