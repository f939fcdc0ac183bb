// bookstore/src/workflow/mod.rs

//! A small step-pipeline engine used to express the multi-step bookstore flows
//! (adding to a cart, placing an order).
//!
//! A [`Pipeline`] is an ordered list of named steps. Each step may carry
//! `before`, `on` and `after` handlers that receive a shared [`ContextData`]
//! and answer with a [`PipelineControl`]. Steps can be skipped by a condition
//! and marked optional: an optional step without handlers is skipped, and a
//! failing handler in an optional step is logged and does not abort the run.
//!
//! Pipelines are registered once in a [`Workflows`] registry, keyed by their
//! context type, and run per request.

pub mod context_data;
pub mod control;
pub mod error;
pub mod execution;
pub mod pipeline;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use error::WorkflowError;
pub use pipeline::{Handler, Pipeline};
pub use registry::Workflows;
pub use step::{SkipCondition, StepDef};
