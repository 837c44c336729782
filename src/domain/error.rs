use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid website URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(String),
}
