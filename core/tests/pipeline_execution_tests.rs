// tests/pipeline_execution_tests.rs
mod common;

use bookstore::workflow::{ContextData, Pipeline, PipelineControl, PipelineResult, SkipCondition, WorkflowError};
use common::*;
use serial_test::serial;
use std::sync::Arc;

#[tokio::test]
#[serial]
async fn test_pipeline_runs_steps_in_order() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "ordered",
    &[("step1", false, None), ("step2", false, None), ("step3", false, None)],
  );

  pipeline.on_step("step1", create_simple_handler("step1", " S1")).unwrap();
  pipeline.on_step("step2", create_simple_handler("step2", " S2")).unwrap();
  pipeline.on_step("step3", create_simple_handler("step3", " S3")).unwrap();

  let ctx = ContextData::new(TestContext::default());
  let result = pipeline.run(ctx.clone()).await;

  assert_eq!(result.unwrap(), PipelineResult::Completed);
  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.message, " S1 S2 S3");
  assert_eq!(guard.steps_executed, vec!["step1", "step2", "step3"]);
}

#[tokio::test]
#[serial]
async fn test_pipeline_stops_on_pipeline_control_stop() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "stopping",
    &[("stepA", false, None), ("stopStep", false, None), ("stepC", false, None)],
  );

  pipeline.on_step("stepA", create_simple_handler("stepA", "A")).unwrap();
  pipeline
    .on_step("stopStep", |ctx: ContextData<TestContext>| async move {
      ctx.write().steps_executed.push("stopStep".to_string());
      Ok::<_, TestError>(PipelineControl::Stop)
    })
    .unwrap();
  pipeline.on_step("stepC", create_simple_handler("stepC", "C")).unwrap();

  let ctx = ContextData::new(TestContext::default());
  let result = pipeline.run(ctx.clone()).await;

  assert_eq!(result.unwrap(), PipelineResult::Stopped);
  let guard = ctx.read();
  assert_eq!(guard.counter, 1);
  assert_eq!(guard.message, "A");
  assert_eq!(guard.steps_executed, vec!["stepA", "stopStep"]);
}

#[tokio::test]
#[serial]
async fn test_pipeline_propagates_handler_error() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "failing",
    &[("good_step", false, None), ("bad_step", false, None), ("another_step", false, None)],
  );

  pipeline.on_step("good_step", create_simple_handler("good_step", "Good")).unwrap();
  pipeline
    .on_step("bad_step", create_failing_handler("bad_step", "I am a bad step!"))
    .unwrap();
  pipeline
    .on_step("another_step", create_simple_handler("another_step", "NeverRun"))
    .unwrap();

  let ctx = ContextData::new(TestContext::default());
  let result = pipeline.run(ctx.clone()).await;

  assert_eq!(result, Err(TestError::Handler("I am a bad step!".to_string())));
  let guard = ctx.read();
  assert_eq!(guard.counter, 1);
  assert_eq!(guard.steps_executed, vec!["good_step", "bad_step"]);
}

#[tokio::test]
#[serial]
async fn test_pipeline_skips_step_if_condition_met() {
  setup_tracing();
  let skip_after_first: SkipCondition<TestContext> = Arc::new(|ctx: &ContextData<TestContext>| ctx.read().counter > 0);
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "skipping",
    &[
      ("step1", false, None),
      ("step_to_skip", false, Some(skip_after_first)),
      ("step3", false, None),
    ],
  );

  pipeline.on_step("step1", create_simple_handler("step1", " S1")).unwrap();
  pipeline
    .on_step("step_to_skip", create_simple_handler("step_to_skip", " SKIPPED"))
    .unwrap();
  pipeline.on_step("step3", create_simple_handler("step3", " S3")).unwrap();

  let ctx = ContextData::new(TestContext::default());
  let result = pipeline.run(ctx.clone()).await;

  assert_eq!(result.unwrap(), PipelineResult::Completed);
  let guard = ctx.read();
  assert_eq!(guard.message, " S1 S3");
  assert_eq!(guard.steps_executed, vec!["step1", "step3"]);
}

#[tokio::test]
#[serial]
async fn test_required_step_missing_handler_fails() {
  setup_tracing();
  let pipeline = Pipeline::<TestContext, TestError>::new("bare", &[("step_with_no_handler", false, None)]);

  let result = pipeline.run(ContextData::new(TestContext::default())).await;

  match result {
    Err(TestError::Workflow(s)) => {
      assert!(s.contains("HandlerMissing"));
      assert!(s.contains("step_with_no_handler"));
    }
    other => panic!("Expected HandlerMissing, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_optional_step_missing_handler_succeeds() {
  setup_tracing();
  let pipeline = Pipeline::<TestContext, TestError>::new("bare_optional", &[("optional_step_no_handler", true, None)]);

  let result = pipeline.run(ContextData::new(TestContext::default())).await;

  assert_eq!(result.unwrap(), PipelineResult::Completed);
}

#[tokio::test]
#[serial]
async fn test_before_on_after_execution_order() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new("phases", &[("main_step", false, None)]);

  // Registered out of phase order on purpose.
  pipeline
    .after_step("main_step", create_simple_handler("after_main", "After;"))
    .unwrap()
    .on_step("main_step", create_simple_handler("on_main", "On;"))
    .unwrap()
    .before_step("main_step", create_simple_handler("before_main", "Before;"))
    .unwrap();

  let ctx = ContextData::new(TestContext::default());
  pipeline.run(ctx.clone()).await.unwrap();

  let guard = ctx.read();
  assert_eq!(guard.message, "Before;On;After;");
  assert_eq!(guard.steps_executed, vec!["before_main", "on_main", "after_main"]);
}

#[tokio::test]
#[serial]
async fn test_insert_after_step_runs_new_step_in_place() {
  setup_tracing();
  let mut pipeline =
    Pipeline::<TestContext, TestError>::new("growing", &[("first", false, None), ("last", false, None)]);
  pipeline.insert_after_step("first", "middle", false, None).unwrap();
  assert_eq!(pipeline.step_names(), vec!["first", "middle", "last"]);

  pipeline.on_step("first", create_simple_handler("first", "1")).unwrap();
  pipeline.on_step("middle", create_simple_handler("middle", "2")).unwrap();
  pipeline.on_step("last", create_simple_handler("last", "3")).unwrap();

  let ctx = ContextData::new(TestContext::default());
  pipeline.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().message, "123");
}

#[test]
fn test_insert_after_step_rejects_unknown_and_duplicate_steps() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new("growing", &[("first", false, None)]);

  assert!(matches!(
    pipeline.insert_after_step("nope", "x", false, None),
    Err(WorkflowError::StepNotFound { .. })
  ));
  assert!(matches!(
    pipeline.insert_after_step("first", "first", false, None),
    Err(WorkflowError::DuplicateStep { .. })
  ));
}

#[test]
fn test_attaching_handler_to_unknown_step_fails() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new("typo", &[("real_step", false, None)]);

  let result = pipeline.on_step("reel_step", create_simple_handler("reel_step", ""));

  match result {
    Err(WorkflowError::StepNotFound { pipeline, step_name }) => {
      assert_eq!(pipeline, "typo");
      assert_eq!(step_name, "reel_step");
    }
    other => panic!("Expected StepNotFound, got {:?}", other.map(|_| ())),
  }
}
