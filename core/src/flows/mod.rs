// bookstore/src/flows/mod.rs

//! The cart-to-order flows, expressed as pipelines over the workflow engine.
//!
//! Both pipelines are built once and registered in a [`Workflows`] registry;
//! services then dispatch by context type.

pub mod cart_flow;
pub mod contexts;
pub mod order_flow;

pub use contexts::{AddToCartCtxData, PlaceOrderCtxData};

use crate::error::BookstoreError;
use crate::workflow::{WorkflowError, Workflows};
use tracing::info;

/// Builds and registers every bookstore pipeline.
pub fn register_all_flows(workflows: &Workflows<BookstoreError>) -> Result<(), WorkflowError> {
  workflows.register(cart_flow::add_to_cart_pipeline()?);
  workflows.register(order_flow::place_order_pipeline()?);
  info!("Bookstore pipelines registered.");
  Ok(())
}
