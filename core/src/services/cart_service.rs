// bookstore/src/services/cart_service.rs

use crate::error::{BookstoreError, Result};
use crate::flows::AddToCartCtxData;
use crate::models::{CartLine, CartView};
use crate::store::{books_by_id, CartRepository, Store};
use crate::validation::validate_quantity;
use crate::workflow::{ContextData, PipelineResult, WorkflowError, Workflows};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// One active cart per user. Adding goes through the `add_to_cart`
/// pipeline; the other edits are single read-modify-write calls.
#[derive(Clone)]
pub struct CartService {
  store: Arc<dyn Store>,
  workflows: Arc<Workflows<BookstoreError>>,
}

impl CartService {
  pub fn new(store: Arc<dyn Store>, workflows: Arc<Workflows<BookstoreError>>) -> Self {
    Self { store, workflows }
  }

  /// Adds `quantity` copies of a book, merging with an existing line.
  #[instrument(name = "CartService::add_line", skip(self), err(Display))]
  pub async fn add_line(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> Result<CartLine> {
    let ctx = ContextData::new(AddToCartCtxData::new(self.store.clone(), user_id, book_id, quantity));
    match self.workflows.run(ctx.clone()).await? {
      PipelineResult::Completed => {}
      PipelineResult::Stopped => info!("add_to_cart stopped early."),
    }
    let line = ctx.with(|d| d.updated_line.clone());
    line.ok_or_else(|| WorkflowError::state_missing("add_to_cart", "updated_line").into())
  }

  #[instrument(name = "CartService::update_line", skip(self), err(Display))]
  pub async fn update_line(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> Result<CartLine> {
    validate_quantity(quantity)?;
    let mut cart = self
      .store
      .find_cart(user_id)
      .await?
      .ok_or_else(|| BookstoreError::not_found("Cart not found"))?;
    let line = cart
      .set_quantity(book_id, quantity)
      .ok_or_else(|| BookstoreError::not_found("Item not found in cart"))?;
    self.store.save_cart(&cart).await?;
    Ok(line)
  }

  #[instrument(name = "CartService::remove_line", skip(self), err(Display))]
  pub async fn remove_line(&self, user_id: Uuid, book_id: Uuid) -> Result<()> {
    let mut cart = self
      .store
      .find_cart(user_id)
      .await?
      .ok_or_else(|| BookstoreError::not_found("Cart not found"))?;
    cart
      .remove(book_id)
      .ok_or_else(|| BookstoreError::not_found("Item not found in cart"))?;
    self.store.save_cart(&cart).await
  }

  /// Deletes the cart. Succeeds whether or not a cart existed.
  #[instrument(name = "CartService::clear", skip(self), err(Display))]
  pub async fn clear(&self, user_id: Uuid) -> Result<()> {
    let existed = self.store.delete_cart(user_id).await?;
    info!(existed, "Cart cleared.");
    Ok(())
  }

  #[instrument(name = "CartService::view", skip(self), err(Display))]
  pub async fn view(&self, user_id: Uuid) -> Result<CartView> {
    let cart = self
      .store
      .find_cart(user_id)
      .await?
      .ok_or_else(|| BookstoreError::not_found("Cart not found"))?;
    let books = books_by_id(&*self.store, &cart.book_ids()).await?;
    CartView::build(&cart, &books)
  }
}
