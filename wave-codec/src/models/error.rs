use thiserror::Error;

/// Errors that can occur while reading or writing a WAVE stream.
///
/// Every variant aborts the current operation. I/O failures are carried as
/// strings so the error stays `Clone + PartialEq`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaveError {
    #[error("source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("destination unavailable: {path}: {reason}")]
    DestinationUnavailable { path: String, reason: String },

    #[error("malformed container: expected {expected:?}, found {found:?}")]
    MalformedContainer { expected: String, found: String },

    #[error("unsupported fact chunk: expected byte count 4, found {found}")]
    UnsupportedFact { found: u32 },

    #[error("truncated stream reading {field}: needed {needed} bytes, {available} available")]
    TruncatedStream {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("data chunk found before a usable fmt chunk (bit depth {bit_depth})")]
    MissingFormat { bit_depth: u16 },

    #[error("data chunk of {raw_byte_count} bytes is not a multiple of {bytes_per_sample}-byte samples")]
    MisalignedData { raw_byte_count: u32, bytes_per_sample: u16 },

    #[error("payload of {raw_byte_count} bytes does not fit a 32-bit RIFF size field")]
    PayloadTooLarge { raw_byte_count: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("header report failed: {0}")]
    ReportFailed(String),
}

impl WaveError {
    /// Build a `MalformedContainer` error from the raw tag bytes.
    pub(crate) fn malformed(expected: &[u8; 4], found: &[u8; 4]) -> Self {
        Self::MalformedContainer {
            expected: String::from_utf8_lossy(expected).into_owned(),
            found: String::from_utf8_lossy(found).into_owned(),
        }
    }
}
