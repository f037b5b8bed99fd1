use thiserror::Error;

/// Failures that discard a whole decode. Row-level problems never surface here;
/// decoders drop the offending row and keep going.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("channel '{channel}' has {actual} samples but the time axis has {expected}")]
    LengthMismatch {
        channel: String,
        expected: usize,
        actual: usize,
    },
}
