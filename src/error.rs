use enough::StopReason;

use crate::format::PtmFormat;

/// Errors from PTM decoding, encoding and export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PtmError {
    #[error("unsupported PTM version: {found:?}")]
    UnsupportedVersion { found: String },

    #[error("unsupported PTM format: {found:?}")]
    UnsupportedFormat { found: String },

    #[error("malformed header line {line} at byte {offset}: {reason}")]
    MalformedHeader {
        line: usize,
        offset: usize,
        reason: String,
    },

    #[error("truncated {stage} at byte {offset}: need {needed} bytes, got {actual}")]
    Truncated {
        stage: &'static str,
        offset: usize,
        needed: usize,
        actual: usize,
    },

    #[error("format {0:?} is recognized but not implemented")]
    NotImplemented(PtmFormat),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PtmError {
    fn from(r: StopReason) -> Self {
        PtmError::Cancelled(r)
    }
}
