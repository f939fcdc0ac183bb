// bookstore/src/error.rs
use crate::workflow::WorkflowError;
use thiserror::Error;

/// Errors surfaced by bookstore operations.
#[derive(Debug, Error)]
pub enum BookstoreError {
  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Cart is empty")]
  EmptyCart,

  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Already exists: {0}")]
  AlreadyExists(String),

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Notification failed: {0}")]
  Notification(String),

  /// The persistence backend failed. Never caused by user input.
  #[error("Storage error: {source}")]
  Storage {
    #[source]
    source: anyhow::Error,
  },

  #[error("Workflow error: {0}")]
  Workflow(#[from] WorkflowError),
}

impl BookstoreError {
  pub fn storage(err: impl Into<anyhow::Error>) -> Self {
    BookstoreError::Storage { source: err.into() }
  }

  pub fn not_found(what: impl Into<String>) -> Self {
    BookstoreError::NotFound(what.into())
  }
}

pub type Result<T, E = BookstoreError> = std::result::Result<T, E>;
