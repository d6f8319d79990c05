//! Error types for the marketplace domain.
//!
//! Repositories fail with [`StoreError`]; services fail with
//! [`DomainError`], which the HTTP layer maps onto status codes.

use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing database rejected or failed a query
    #[error("Database error: {0}")]
    Database(String),

    /// A stored value could not be converted to or from its domain type
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors returned by marketplace services.
///
/// Every variant is scoped to a single request and never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The requested entity does not exist
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// Kind of entity (e.g. `"Listing"`)
        resource: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Input failed validation or violates a business rule
    #[error("{0}")]
    InvalidArgument(String),

    /// The caller is authenticated but not allowed to touch the resource
    #[error("{0}")]
    Forbidden(String),

    /// The request conflicts with existing state
    #[error("{0}")]
    Conflict(String),

    /// Underlying storage failure
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl DomainError {
    /// Build a `NotFound` error for any displayable id.
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Build an `InvalidArgument` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Build a `Forbidden` error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}

/// Convenience alias for service results.
pub type DomainResult<T> = Result<T, DomainError>;
