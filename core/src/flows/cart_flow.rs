// bookstore/src/flows/cart_flow.rs

use super::contexts::AddToCartCtxData;
use crate::error::BookstoreError;
use crate::models::Cart;
use crate::store::{BookRepository, CartRepository};
use crate::validation::validate_quantity;
use crate::workflow::{ContextData, Pipeline, PipelineControl, WorkflowError};
use tracing::{debug, info, warn};

pub const ADD_TO_CART: &str = "add_to_cart";

type Ctx = ContextData<AddToCartCtxData>;
type StepResult = Result<PipelineControl, BookstoreError>;

/// `validate_cart_input` -> `fetch_book_for_cart` -> `load_or_create_cart`
/// -> `merge_cart_line` -> `persist_cart`.
pub fn add_to_cart_pipeline() -> Result<Pipeline<AddToCartCtxData, BookstoreError>, WorkflowError> {
  let mut p = Pipeline::<AddToCartCtxData, BookstoreError>::new(
    ADD_TO_CART,
    &[
      ("validate_cart_input", false, None),
      ("fetch_book_for_cart", false, None),
      ("load_or_create_cart", false, None),
      ("merge_cart_line", false, None),
      ("persist_cart", false, None),
    ],
  );

  p.on_step("validate_cart_input", validate_cart_input)?
    .on_step("fetch_book_for_cart", fetch_book_for_cart)?
    .on_step("load_or_create_cart", load_or_create_cart)?
    .on_step("merge_cart_line", merge_cart_line)?
    .on_step("persist_cart", persist_cart)?;

  Ok(p)
}

async fn validate_cart_input(ctx: Ctx) -> StepResult {
  let quantity = ctx.with(|d| d.quantity);
  if let Err(e) = validate_quantity(quantity) {
    warn!(quantity, "Rejected cart quantity.");
    return Err(e);
  }
  Ok(PipelineControl::Continue)
}

async fn fetch_book_for_cart(ctx: Ctx) -> StepResult {
  let (store, book_id) = ctx.with(|d| (d.store.clone(), d.book_id));
  let book = store
    .find_book(book_id)
    .await?
    .ok_or_else(|| BookstoreError::not_found("Book not found"))?;
  debug!(%book_id, price_cents = book.price_cents, "Book found for cart.");
  ctx.write().book = Some(book);
  Ok(PipelineControl::Continue)
}

async fn load_or_create_cart(ctx: Ctx) -> StepResult {
  let (store, user_id) = ctx.with(|d| (d.store.clone(), d.user_id));
  let cart = match store.find_cart(user_id).await? {
    Some(cart) => cart,
    None => {
      debug!(%user_id, "No cart yet; starting a new one.");
      Cart::new(user_id)
    }
  };
  ctx.write().cart = Some(cart);
  Ok(PipelineControl::Continue)
}

async fn merge_cart_line(ctx: Ctx) -> StepResult {
  let mut guard = ctx.write();
  let data = &mut *guard;
  let price_cents = data
    .book
    .as_ref()
    .map(|b| b.price_cents)
    .ok_or_else(|| WorkflowError::state_missing("merge_cart_line", "book"))?;
  let cart = data
    .cart
    .as_mut()
    .ok_or_else(|| WorkflowError::state_missing("merge_cart_line", "cart"))?;
  let line = cart.add(data.book_id, data.quantity, price_cents)?;
  data.updated_line = Some(line);
  Ok(PipelineControl::Continue)
}

async fn persist_cart(ctx: Ctx) -> StepResult {
  let (store, cart) = ctx.with(|d| (d.store.clone(), d.cart.clone()));
  let cart = cart.ok_or_else(|| WorkflowError::state_missing("persist_cart", "cart"))?;
  store.save_cart(&cart).await?;
  info!(user_id = %cart.user_id, lines = cart.lines.len(), "Cart saved.");
  Ok(PipelineControl::Continue)
}
