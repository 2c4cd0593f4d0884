use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from record loading and segmenter configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record or annotation file could not be read.
    #[error("failed to read '{path}'")]
    DataSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record does not carry the requested signal.
    #[error("record '{path}' has {available} signals, lead {requested} was requested")]
    LeadOutOfRange {
        path: PathBuf,
        available: usize,
        requested: usize,
    },

    /// Window size or step the segmenter cannot honor.
    #[error("invalid window configuration: {message}")]
    InvalidWindow { message: String },
}
