use crate::decode::series::{Channel, TimeSeries};

/// What the `duration` figure is measured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    /// Formats without a sampling rate report the sample count as their duration.
    Samples,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelStats {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub rms: f64,
}

impl ChannelStats {
    fn compute(channel: &Channel) -> Self {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for &v in &channel.values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            sum_sq += v * v;
        }
        let n = channel.values.len().max(1) as f64;
        Self {
            name: channel.name.clone(),
            min,
            max,
            mean: sum / n,
            rms: (sum_sq / n).sqrt(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSummary {
    pub total_samples: usize,
    pub duration: f64,
    pub duration_unit: DurationUnit,
    pub sampling_rate: Option<f64>,
    pub channels: Vec<ChannelStats>,
}

impl SeriesSummary {
    pub fn compute(series: &TimeSeries, sampling_rate: Option<f64>) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let total_samples = series.len();
        let (duration, duration_unit) = match sampling_rate {
            Some(rate) if rate > 0.0 => (total_samples as f64 / rate, DurationUnit::Seconds),
            _ => (total_samples as f64, DurationUnit::Samples),
        };
        Some(Self {
            total_samples,
            duration,
            duration_unit,
            sampling_rate,
            channels: series.channels().iter().map(ChannelStats::compute).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_has_no_summary() {
        assert!(SeriesSummary::compute(&TimeSeries::empty(), Some(500.0)).is_none());
    }

    #[test]
    fn duration_follows_rate() {
        let series = TimeSeries::new(
            vec![0.0, 0.002, 0.004, 0.006],
            vec![Channel::new(1, vec![1.0, -1.0, 3.0, -3.0])],
        )
        .unwrap();
        let summary = SeriesSummary::compute(&series, Some(500.0)).unwrap();
        assert_eq!(summary.total_samples, 4);
        assert!((summary.duration - 0.008).abs() < 1e-12);
        assert_eq!(summary.duration_unit, DurationUnit::Seconds);

        let stats = &summary.channels[0];
        assert_eq!(stats.min, -3.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 0.0);
        assert!((stats.rms - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn no_rate_reports_samples() {
        let series = TimeSeries::new(vec![0.0, 1.0], vec![Channel::new(1, vec![1.0, 2.0])]).unwrap();
        let summary = SeriesSummary::compute(&series, None).unwrap();
        assert_eq!(summary.duration, 2.0);
        assert_eq!(summary.duration_unit, DurationUnit::Samples);
    }
}
