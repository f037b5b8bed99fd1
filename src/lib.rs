//! Signal-recording viewer core: decode CSV, JSON and SVG recordings into a
//! uniform time series and hold the state the chart is drawn from.
pub mod decode;
pub mod export;
pub mod viewer;

pub use decode::{decode_bytes, DecodeConfig, LoadOutcome, TimeSeries};
pub use viewer::ViewerState;
