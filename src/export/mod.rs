// src/export/mod.rs
pub mod csv;
pub mod error;
pub mod plot;

pub use self::csv::write_csv;
pub use self::error::ExportError;
pub use self::plot::{render_series_png, PlotStyle};
