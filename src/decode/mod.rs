// src/decode/mod.rs
pub mod config;
pub mod csv;
pub mod error;
pub mod format;
pub mod json;
pub mod normalize;
pub mod pipeline;
pub mod series;
pub mod source;
pub mod summary;
pub mod svg;

pub use self::config::{ChannelSelector, DecodeConfig, DEFAULT_SAMPLING_RATE_HZ};
pub use self::csv::CsvDecoder;
pub use self::error::DecodeError;
pub use self::format::FormatKind;
pub use self::json::JsonDecoder;
pub use self::pipeline::{decode_bytes, try_decode, LoadOutcome};
pub use self::series::{Channel, TimeSeries};
pub use self::source::{Decoded, Decoder};
pub use self::summary::{ChannelStats, DurationUnit, SeriesSummary};
pub use self::svg::SvgDecoder;
