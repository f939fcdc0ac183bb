// bookstore/src/workflow/execution.rs

//! `Pipeline::run()`: walks the steps in order and drives their handlers.

use super::context_data::ContextData;
use super::control::{PipelineControl, PipelineResult};
use super::error::WorkflowError;
use super::pipeline::{Phase, Pipeline};
use super::step::StepDef;
use tracing::{event, instrument, Instrument, Level};

/// What happened to a single step.
enum StepOutcome {
  Finished,
  Stopped,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  /// Executes every step against `ctx_data`.
  ///
  /// Returns `Completed` when all steps ran, `Stopped` when a handler asked to
  /// halt, or the first error of a required step. Errors raised inside an
  /// optional step are logged and the run moves on to the next step.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(pipeline = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = tracing::info_span!(
        "pipeline_step",
        step_name = %step_def.name,
        step_index = step_idx,
        optional = step_def.optional
      );

      match self.run_step(step_def, &ctx_data).instrument(step_span).await {
        Ok(StepOutcome::Finished) => {}
        Ok(StepOutcome::Stopped) => {
          event!(Level::INFO, step_name = %step_def.name, "Pipeline stopped by a handler.");
          return Ok(PipelineResult::Stopped);
        }
        Err(e) if step_def.optional => {
          event!(Level::WARN, step_name = %step_def.name, error = %e, "Optional step failed; continuing.");
        }
        Err(e) => return Err(e),
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: &ContextData<TData>) -> Result<StepOutcome, Err> {
    if let Some(skip_if) = &step_def.skip_if {
      if skip_if(ctx_data) {
        event!(Level::DEBUG, "Step skipped by its skip condition.");
        return Ok(StepOutcome::Finished);
      }
    }

    let has_handlers = Phase::ALL
      .iter()
      .any(|phase| !self.handlers_for(&step_def.name, *phase).is_empty());
    if !has_handlers {
      if step_def.optional {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return Ok(StepOutcome::Finished);
      }
      event!(Level::ERROR, "Required step has no handlers.");
      return Err(Err::from(WorkflowError::HandlerMissing {
        step_name: step_def.name.clone(),
      }));
    }

    for phase in Phase::ALL {
      for (handler_idx, handler_fn) in self.handlers_for(&step_def.name, phase).iter().enumerate() {
        event!(Level::TRACE, phase = phase.label(), handler_index = handler_idx, "Running handler.");
        match handler_fn(ctx_data.clone()).await {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => return Ok(StepOutcome::Stopped),
          Err(e) => {
            event!(Level::DEBUG, phase = phase.label(), error = %e, "Handler failed.");
            return Err(e);
          }
        }
      }
    }

    Ok(StepOutcome::Finished)
  }
}
