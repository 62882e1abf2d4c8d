use thiserror::Error;
use crate::backend::BackendError;

/// Crate-level errors.
///
/// The operation coordinator never returns these to its callers (failures
/// surface as notifications plus a `None` completion), but config loading
/// and embedding hosts need a conventional error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
