//! Error type shared by the input, config, report and server layers
//!
//! The mock generators themselves cannot fail; everything around them
//! (reading uploads, loading a vocabulary file, writing reports) can.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// File extension is not one of the accepted audio formats
    #[error("unsupported audio format: {0} (expected mp3 or wav)")]
    UnsupportedFormat(String),

    /// Upload carried no bytes
    #[error("uploaded audio is empty")]
    EmptyInput,

    #[error("upload exceeds the {limit_bytes} byte limit")]
    UploadTooLarge { limit_bytes: u64 },

    /// Vocabulary file loaded but one of its tables is unusable
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Server(String),
}

impl Error {
    /// True for errors caused by what the client sent rather than by us
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_) | Error::EmptyInput | Error::UploadTooLarge { .. }
        )
    }
}
