use crate::decode::format::FormatKind;
use crate::decode::source::Decoded;
use crate::decode::summary::SeriesSummary;
use crate::decode::{DecodeConfig, DecodeError, TimeSeries};

/// Everything the viewer needs after one file has been loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOutcome {
    pub file_name: String,
    pub format: FormatKind,
    pub series: TimeSeries,
    /// Absent for an empty series, so "no data" is never shown as zeros.
    pub summary: Option<SeriesSummary>,
}

impl LoadOutcome {
    /// Outcome for a file that could not be read at all.
    pub fn unreadable(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            format: FormatKind::sniff(file_name),
            series: TimeSeries::empty(),
            summary: None,
        }
    }
}

/// Sniff, decode and summarise. Never fails: a decode error is logged and turned
/// into an empty series.
pub fn decode_bytes(file_name: &str, bytes: &[u8], config: &DecodeConfig) -> LoadOutcome {
    let format = FormatKind::sniff(file_name);
    let decoded = match try_decode(format, bytes, config) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::warn!("could not decode {file_name} as {format}: {err}");
            Decoded::empty()
        }
    };
    let summary = SeriesSummary::compute(&decoded.series, decoded.sampling_rate);
    match &summary {
        Some(s) => log::info!(
            "loaded {file_name} ({format}): {} samples, {} channels",
            s.total_samples,
            decoded.series.channels().len()
        ),
        None => log::info!("loaded {file_name} ({format}): no data"),
    }
    LoadOutcome {
        file_name: file_name.to_owned(),
        format,
        series: decoded.series,
        summary,
    }
}

pub fn try_decode(
    format: FormatKind,
    bytes: &[u8],
    config: &DecodeConfig,
) -> Result<Decoded, DecodeError> {
    format.decoder().decode(bytes, config)
}
