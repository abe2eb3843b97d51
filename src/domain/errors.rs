use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Authentication credentials were not provided or are invalid")]
    Unauthenticated,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl<T> From<std::sync::PoisonError<T>> for DomainError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DomainError::Internal(e.to_string())
    }
}
