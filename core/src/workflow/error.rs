// bookstore/src/workflow/error.rs
use thiserror::Error;

/// Errors raised by the pipeline machinery itself, as opposed to the
/// business errors returned by handlers.
#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("Step not found in pipeline '{pipeline}': {step_name}")]
  StepNotFound { pipeline: String, step_name: String },

  #[error("Step already defined in pipeline '{pipeline}': {step_name}")]
  DuplicateStep { pipeline: String, step_name: String },

  #[error("Handler missing for required step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Step '{step_name}' expected '{field}' to be populated by an earlier step")]
  StateMissing { step_name: String, field: &'static str },

  #[error("No pipeline registered for context type {type_name}")]
  NotRegistered { type_name: &'static str },

  #[error("Context type mismatch (expected {expected_type})")]
  TypeMismatch { expected_type: &'static str },
}

impl WorkflowError {
  pub fn state_missing(step_name: &str, field: &'static str) -> Self {
    WorkflowError::StateMissing {
      step_name: step_name.to_string(),
      field,
    }
  }
}
