//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `TrError` as one variant
//! where they call into `tr-core`.

use thiserror::Error;

/// The top-level error type for `tr-core`.
#[derive(Debug, Error)]
pub enum TrError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `tr-core`.
pub type TrResult<T> = Result<T, TrError>;
