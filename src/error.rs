//! The [`SeqStatsError`] `enum` definition and error messages.
//!
use std::io;
use thiserror::Error;

/// The [`SeqStatsError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum SeqStatsError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(io::Error),

    // Detection and decoding errors
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("Could not decode text: {0}")]
    DecodeError(String),
    #[error("Could not decompress input: {0}")]
    DecompressionError(String),

    // Statistics errors
    #[error("Mode must be either 'raw' or 'canonical', got '{0}'")]
    InvalidMode(String),

    // Parsing errors
    #[error("Malformed FASTQ record: {0}")]
    MalformedFastqRecord(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Error processing file: {0}")]
    ProcessingFailure(String),

    // Operation errors
    #[error("This operation only accepts FASTQ files, got '{0}'")]
    FastqRequired(String),
    #[error("Could not serialize response: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SeqStatsError {
    /// Whether this error was caused by the input the caller supplied
    /// (bad filename, bad bytes, bad argument), rather than by a failure
    /// while processing otherwise acceptable input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SeqStatsError::UnsupportedFormat(_)
                | SeqStatsError::InvalidMode(_)
                | SeqStatsError::DecodeError(_)
                | SeqStatsError::MalformedFastqRecord(_)
                | SeqStatsError::MalformedRecord(_)
                | SeqStatsError::FastqRequired(_)
        )
    }

    /// The HTTP-style status code a service boundary should answer with.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Wrap this error in an [`io::Error`], so it can travel through
    /// third-party readers that only speak [`io::Result`]. The original
    /// variant is recovered by the `From<io::Error>` conversion below.
    pub(crate) fn into_io_error(self) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, self)
    }
}

impl From<io::Error> for SeqStatsError {
    fn from(err: io::Error) -> Self {
        if !err
            .get_ref()
            .map_or(false, |inner| inner.is::<SeqStatsError>())
        {
            return SeqStatsError::IOError(err);
        }
        match err.into_inner().map(|inner| inner.downcast::<SeqStatsError>()) {
            Some(Ok(tagged)) => *tagged,
            _ => SeqStatsError::ProcessingFailure("unrecognized I/O error payload".to_string()),
        }
    }
}
