// bookstore/src/flows/contexts.rs

//! Context data carried through the bookstore pipelines. Handlers receive
//! these wrapped in [`ContextData`](crate::workflow::ContextData).

use crate::models::{Book, Cart, CartLine, Order, OrderView};
use crate::notify::Notifier;
use crate::store::Store;
use std::sync::Arc;
use uuid::Uuid;

/// State of one `add_to_cart` run.
#[derive(Clone)]
pub struct AddToCartCtxData {
  pub store: Arc<dyn Store>,
  pub user_id: Uuid,
  pub book_id: Uuid,
  pub quantity: i32,
  pub book: Option<Book>,
  pub cart: Option<Cart>,
  /// The merged line, set once `merge_cart_line` ran.
  pub updated_line: Option<CartLine>,
}

impl AddToCartCtxData {
  pub fn new(store: Arc<dyn Store>, user_id: Uuid, book_id: Uuid, quantity: i32) -> Self {
    Self {
      store,
      user_id,
      book_id,
      quantity,
      book: None,
      cart: None,
      updated_line: None,
    }
  }
}

/// State of one `place_order` run.
#[derive(Clone)]
pub struct PlaceOrderCtxData {
  pub store: Arc<dyn Store>,
  pub notifier: Arc<dyn Notifier>,
  pub user_id: Uuid,
  pub cart: Option<Cart>,
  pub order: Option<Order>,
  pub order_view: Option<OrderView>,
  pub customer_email: Option<String>,
  pub confirmation_sent: bool,
}

impl PlaceOrderCtxData {
  pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>, user_id: Uuid) -> Self {
    Self {
      store,
      notifier,
      user_id,
      cart: None,
      order: None,
      order_view: None,
      customer_email: None,
      confirmation_sent: false,
    }
  }
}
