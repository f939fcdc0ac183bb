// bookstore/src/workflow/registry.rs

//! `Workflows<E>`: pipelines registered once at startup, keyed by the type of
//! context data they run over.

use super::context_data::ContextData;
use super::control::PipelineResult;
use super::error::WorkflowError;
use super::pipeline::Pipeline;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

/// Type-erased runner so pipelines over different context types can share one map.
#[async_trait]
trait ErasedPipeline<E>: Send + Sync
where
  E: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  fn name(&self) -> &str;

  async fn run_erased(&self, ctx: Box<dyn Any + Send>) -> Result<PipelineResult, E>;
}

#[async_trait]
impl<TData, E> ErasedPipeline<E> for Pipeline<TData, E>
where
  TData: 'static + Send + Sync,
  E: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  fn name(&self) -> &str {
    Pipeline::name(self)
  }

  async fn run_erased(&self, ctx: Box<dyn Any + Send>) -> Result<PipelineResult, E> {
    let ctx_data = ctx.downcast::<ContextData<TData>>().map_err(|_| {
      E::from(WorkflowError::TypeMismatch {
        expected_type: std::any::type_name::<ContextData<TData>>(),
      })
    })?;
    self.run(*ctx_data).await
  }
}

/// Registry of pipelines returning the application error type `E`.
pub struct Workflows<E>
where
  E: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  pipelines: RwLock<HashMap<TypeId, Arc<dyn ErasedPipeline<E>>>>,
}

impl<E> Workflows<E>
where
  E: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      pipelines: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `pipeline` for its context type, replacing any previous one.
  pub fn register<TData>(&self, pipeline: Pipeline<TData, E>)
  where
    TData: 'static + Send + Sync,
  {
    event!(
      Level::DEBUG,
      pipeline = %pipeline.name(),
      context_type = %std::any::type_name::<TData>(),
      "Registering pipeline."
    );
    self
      .pipelines
      .write()
      .insert(TypeId::of::<TData>(), Arc::new(pipeline));
  }

  pub fn is_registered<TData: 'static>(&self) -> bool {
    self.pipelines.read().contains_key(&TypeId::of::<TData>())
  }

  /// Runs the pipeline registered for `TData`.
  pub async fn run<TData>(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, E>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self
      .pipelines
      .read()
      .get(&TypeId::of::<TData>())
      .cloned()
      .ok_or_else(|| {
        let type_name = std::any::type_name::<TData>();
        event!(Level::ERROR, context_type = %type_name, "No pipeline registered.");
        E::from(WorkflowError::NotRegistered { type_name })
      })?;

    event!(Level::DEBUG, pipeline = %runner.name(), "Dispatching pipeline run.");
    runner.run_erased(Box::new(ctx_data)).await
  }
}

impl<E> Default for Workflows<E>
where
  E: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
