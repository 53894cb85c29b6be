//! Error types shared across the library

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Prediction attempted before the one-time training ran
    #[error("risk model has not been trained yet; call ensure_trained() first")]
    ModelNotTrained,

    #[error("cannot train on an empty corpus")]
    EmptyCorpus,

    /// The ensemble learner rejected its parameters or the corpus
    #[error("model training failed: {0}")]
    Training(String),

    /// Uploaded file could not be read as a table
    #[error("malformed upload: {0}")]
    MalformedUpload(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
