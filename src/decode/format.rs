use std::fmt;

use crate::decode::csv::CsvDecoder;
use crate::decode::json::JsonDecoder;
use crate::decode::source::Decoder;
use crate::decode::svg::SvgDecoder;

/// Decoding strategy picked from a file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Csv,
    Json,
    Svg,
}

impl FormatKind {
    /// Extension wins; the content is never inspected. Anything that is not
    /// `.json` or `.svg` is read as CSV.
    pub fn sniff(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".json") {
            FormatKind::Json
        } else if lower.ends_with(".svg") {
            FormatKind::Svg
        } else {
            FormatKind::Csv
        }
    }

    pub fn decoder(self) -> &'static dyn Decoder {
        match self {
            FormatKind::Csv => &CsvDecoder,
            FormatKind::Json => &JsonDecoder,
            FormatKind::Svg => &SvgDecoder,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatKind::Csv => "CSV",
            FormatKind::Json => "JSON",
            FormatKind::Svg => "SVG",
        };
        f.write_str(name)
    }
}
