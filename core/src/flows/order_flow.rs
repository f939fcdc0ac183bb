// bookstore/src/flows/order_flow.rs

use super::contexts::PlaceOrderCtxData;
use crate::error::BookstoreError;
use crate::models::{Order, OrderView};
use crate::store::{books_by_id, CartRepository, OrderRepository, UserRepository};
use crate::workflow::{ContextData, Pipeline, PipelineControl, SkipCondition, WorkflowError};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const PLACE_ORDER: &str = "place_order";

type Ctx = ContextData<PlaceOrderCtxData>;
type StepResult = Result<PipelineControl, BookstoreError>;

/// `load_cart_for_order` -> `compose_order` -> `commit_order`, followed by the
/// optional `load_customer_contact` and `send_order_confirmation` steps. The
/// order is durable once `commit_order` finishes; the later steps never undo it.
pub fn place_order_pipeline() -> Result<Pipeline<PlaceOrderCtxData, BookstoreError>, WorkflowError> {
  let no_recipient: SkipCondition<PlaceOrderCtxData> =
    Arc::new(|ctx: &Ctx| ctx.with(|d| d.customer_email.is_none()));

  let mut p = Pipeline::<PlaceOrderCtxData, BookstoreError>::new(
    PLACE_ORDER,
    &[
      ("load_cart_for_order", false, None),
      ("compose_order", false, None),
      ("commit_order", false, None),
      ("load_customer_contact", true, None),
      ("send_order_confirmation", true, Some(no_recipient)),
    ],
  );

  p.on_step("load_cart_for_order", load_cart_for_order)?
    .on_step("compose_order", compose_order)?
    .on_step("commit_order", commit_order)?
    .on_step("load_customer_contact", load_customer_contact)?
    .on_step("send_order_confirmation", send_order_confirmation)?;

  Ok(p)
}

async fn load_cart_for_order(ctx: Ctx) -> StepResult {
  let (store, user_id) = ctx.with(|d| (d.store.clone(), d.user_id));
  let cart = match store.find_cart(user_id).await? {
    Some(cart) if !cart.is_empty() => cart,
    _ => {
      debug!(%user_id, "Nothing to order.");
      return Err(BookstoreError::EmptyCart);
    }
  };
  ctx.write().cart = Some(cart);
  Ok(PipelineControl::Continue)
}

async fn compose_order(ctx: Ctx) -> StepResult {
  let (store, cart) = ctx.with(|d| (d.store.clone(), d.cart.clone()));
  let cart = cart.ok_or_else(|| WorkflowError::state_missing("compose_order", "cart"))?;
  let order = Order::from_cart(&cart)?;
  let books = books_by_id(&*store, &order.book_ids()).await?;
  let view = OrderView::build(&order, &books);

  let mut guard = ctx.write();
  guard.order = Some(order);
  guard.order_view = Some(view);
  Ok(PipelineControl::Continue)
}

async fn commit_order(ctx: Ctx) -> StepResult {
  let (store, order) = ctx.with(|d| (d.store.clone(), d.order.clone()));
  let order = order.ok_or_else(|| WorkflowError::state_missing("commit_order", "order"))?;
  store.commit_order(&order).await?;
  info!(
    order_id = %order.id,
    user_id = %order.user_id,
    total_cents = order.total_cents,
    "Order placed and cart emptied."
  );
  Ok(PipelineControl::Continue)
}

async fn load_customer_contact(ctx: Ctx) -> StepResult {
  let (store, user_id) = ctx.with(|d| (d.store.clone(), d.user_id));
  match store.find_user(user_id).await? {
    Some(user) => ctx.write().customer_email = Some(user.email),
    None => warn!(%user_id, "Customer record missing; no confirmation will be sent."),
  }
  Ok(PipelineControl::Continue)
}

async fn send_order_confirmation(ctx: Ctx) -> StepResult {
  let (notifier, email, view) = ctx.with(|d| (d.notifier.clone(), d.customer_email.clone(), d.order_view.clone()));
  let email = email.ok_or_else(|| WorkflowError::state_missing("send_order_confirmation", "customer_email"))?;
  let view = view.ok_or_else(|| WorkflowError::state_missing("send_order_confirmation", "order_view"))?;
  notifier.send_order_confirmation(&email, &view).await?;
  ctx.write().confirmation_sent = true;
  debug!(order_id = %view.id, "Order confirmation dispatched.");
  Ok(PipelineControl::Continue)
}
