use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod product_stores;
pub mod products;
pub mod stores;

/// Result type returned by all service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Typed failures surfaced by the service layer. Each variant maps to a
/// distinct HTTP status so callers can tell "nothing to show" from "your
/// request is invalid" from "that price already exists".
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced product, store or association does not exist.
    #[error("resource not found")]
    NotFound,
    /// A second sale price for the same product and store was attempted.
    #[error("{0}")]
    Conflict(String),
    /// The request shape violates a business invariant.
    #[error("{0}")]
    BadRequest(String),
    /// A required field is malformed or missing; checked before any business
    /// rule runs.
    #[error("{0}")]
    Validation(String),
    /// Any other persistence failure; details are logged, not leaked.
    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict => {
                Self::Conflict("only one sale price is allowed per store".to_string())
            }
            other => Self::Repository(other),
        }
    }
}
