// bookstore_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use bookstore::{BookstoreError, WorkflowError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Already Exists: {0}")]
  AlreadyExists(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Storage Error: {0}")]
  Storage(#[source] anyhow::Error),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: WorkflowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<BookstoreError> for AppError {
  fn from(err: BookstoreError) -> Self {
    match err {
      BookstoreError::NotFound(m) => AppError::NotFound(m),
      BookstoreError::EmptyCart => AppError::Validation("Cart is empty".to_string()),
      BookstoreError::Validation(m) => AppError::Validation(m),
      BookstoreError::AlreadyExists(m) => AppError::AlreadyExists(m),
      BookstoreError::Unauthorized(m) => AppError::Auth(m),
      BookstoreError::Forbidden(m) => AppError::Forbidden(m),
      BookstoreError::Notification(m) => AppError::Internal(m),
      BookstoreError::Storage { source } => match source.downcast::<sqlx::Error>() {
        Ok(db_err) => AppError::Sqlx(db_err),
        Err(other) => AppError::Storage(other),
      },
      BookstoreError::Workflow(source) => AppError::Workflow { source },
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Storage(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }

    let message = match self {
      AppError::Validation(m)
      | AppError::AlreadyExists(m)
      | AppError::Auth(m)
      | AppError::Forbidden(m)
      | AppError::NotFound(m) => m.clone(),
      AppError::Sqlx(_) | AppError::Storage(_) => "Database operation failed".to_string(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Workflow { .. } => "Workflow processing error".to_string(),
      AppError::Internal(_) => "An internal error occurred".to_string(),
    };
    HttpResponse::build(status).json(json!({ "error": message }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
