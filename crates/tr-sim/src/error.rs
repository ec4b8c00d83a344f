use thiserror::Error;

use tr_core::TrError;
use tr_records::RecordError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot simulate {what}: {tables} tables and {reservations} reservations after filtering")]
    NothingToSimulate {
        what:         String,
        tables:       usize,
        reservations: usize,
    },

    #[error("simulation configuration error: {0}")]
    Config(#[from] TrError),

    #[error("record error: {0}")]
    Record(#[from] RecordError),
}

pub type SimResult<T> = Result<T, SimError>;
