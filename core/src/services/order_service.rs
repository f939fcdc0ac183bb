// bookstore/src/services/order_service.rs

use crate::error::{BookstoreError, Result};
use crate::flows::PlaceOrderCtxData;
use crate::models::OrderView;
use crate::notify::Notifier;
use crate::store::{books_by_id, OrderRepository, Store};
use crate::workflow::{ContextData, PipelineResult, WorkflowError, Workflows};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderService {
  store: Arc<dyn Store>,
  notifier: Arc<dyn Notifier>,
  workflows: Arc<Workflows<BookstoreError>>,
}

impl OrderService {
  pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>, workflows: Arc<Workflows<BookstoreError>>) -> Self {
    Self {
      store,
      notifier,
      workflows,
    }
  }

  /// Turns the user's cart into an order and empties the cart.
  ///
  /// Fails with `EmptyCart` when there is no cart or it has no lines. The
  /// confirmation notice is best effort: a delivery failure is logged and the
  /// placed order is still returned.
  #[instrument(name = "OrderService::place_order", skip(self), err(Display))]
  pub async fn place_order(&self, user_id: Uuid) -> Result<OrderView> {
    let ctx = ContextData::new(PlaceOrderCtxData::new(self.store.clone(), self.notifier.clone(), user_id));
    if self.workflows.run(ctx.clone()).await? == PipelineResult::Stopped {
      info!("place_order stopped early.");
    }

    let (view, confirmation_sent) = ctx.with(|d| (d.order_view.clone(), d.confirmation_sent));
    let view = view.ok_or_else(|| WorkflowError::state_missing("place_order", "order_view"))?;
    if !confirmation_sent {
      warn!(order_id = %view.id, "Order placed without a confirmation notice.");
    }
    Ok(view)
  }

  /// The user's orders, newest first.
  #[instrument(name = "OrderService::list_orders", skip(self), err(Display))]
  pub async fn list_orders(&self, user_id: Uuid) -> Result<Vec<OrderView>> {
    let orders = self.store.list_orders_for_user(user_id).await?;
    let mut ids: Vec<Uuid> = orders.iter().flat_map(|o| o.book_ids()).collect();
    ids.sort_unstable();
    ids.dedup();
    let books = books_by_id(&*self.store, &ids).await?;
    Ok(orders.iter().map(|o| OrderView::build(o, &books)).collect())
  }

  /// One order of the user. Orders of other users are reported as missing.
  #[instrument(name = "OrderService::get_order", skip(self), err(Display))]
  pub async fn get_order(&self, user_id: Uuid, order_id: Uuid) -> Result<OrderView> {
    let order = self
      .store
      .find_order(order_id)
      .await?
      .filter(|o| o.user_id == user_id)
      .ok_or_else(|| BookstoreError::not_found("Order not found"))?;
    let books = books_by_id(&*self.store, &order.book_ids()).await?;
    Ok(OrderView::build(&order, &books))
  }
}
