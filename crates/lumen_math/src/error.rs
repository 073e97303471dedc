use thiserror::Error;

/// Errors raised by the vector algebra.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("vector cannot be the zero vector")]
    ZeroVector,
}

/// Result type for vector operations that may produce the zero vector.
pub type MathResult<T> = Result<T, MathError>;
