use thiserror::Error;

use tr_core::TrError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table list decode error: {0}")]
    Decode(String),

    #[error("malformed row: {0}")]
    MalformedRow(String),

    #[error(transparent)]
    Core(#[from] TrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RecordResult<T> = Result<T, RecordError>;
