// bookstore/src/models/cart.rs

use super::book::Book;
use crate::error::{BookstoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One book selection in a cart. `price_cents` is the catalog price captured
/// when the line was first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub book_id: Uuid,
  pub quantity: i32,
  pub price_cents: i64,
}

impl CartLine {
  /// `quantity * price_cents`, or a validation error when it does not fit in `i64`.
  pub fn line_total_cents(&self) -> Result<i64> {
    line_total(self.quantity, self.price_cents)
  }
}

const QUANTITY_TOO_LARGE: &str = "Quantity exceeds the supported maximum";
const AMOUNT_TOO_LARGE: &str = "Amount exceeds the supported maximum";

/// `quantity * price_cents` with overflow reported as a validation error.
pub(crate) fn line_total(quantity: i32, price_cents: i64) -> Result<i64> {
  i64::from(quantity)
    .checked_mul(price_cents)
    .ok_or_else(|| BookstoreError::Validation(AMOUNT_TOO_LARGE.to_string()))
}

/// Sums line totals, failing on the first error or on overflow.
pub(crate) fn sum_cents(mut totals: impl Iterator<Item = Result<i64>>) -> Result<i64> {
  totals.try_fold(0i64, |acc, total| {
    acc
      .checked_add(total?)
      .ok_or_else(|| BookstoreError::Validation(AMOUNT_TOO_LARGE.to_string()))
  })
}

/// The per-user draft of an order. At most one line per book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  pub user_id: Uuid,
  pub lines: Vec<CartLine>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Cart {
  pub fn new(user_id: Uuid) -> Self {
    let now = Utc::now();
    Cart {
      user_id,
      lines: Vec::new(),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn line(&self, book_id: Uuid) -> Option<&CartLine> {
    self.lines.iter().find(|l| l.book_id == book_id)
  }

  /// Adds `quantity` of a book. An existing line keeps its price snapshot
  /// and grows; otherwise a new line is appended at `price_cents`.
  /// Returns the resulting line.
  ///
  /// A merged quantity above `i32::MAX` is a validation error and leaves the
  /// cart unchanged.
  pub fn add(&mut self, book_id: Uuid, quantity: i32, price_cents: i64) -> Result<CartLine> {
    if let Some(line) = self.lines.iter_mut().find(|l| l.book_id == book_id) {
      line.quantity = line
        .quantity
        .checked_add(quantity)
        .ok_or_else(|| BookstoreError::Validation(QUANTITY_TOO_LARGE.to_string()))?;
      let merged = line.clone();
      self.updated_at = Utc::now();
      return Ok(merged);
    }
    let line = CartLine {
      book_id,
      quantity,
      price_cents,
    };
    self.lines.push(line.clone());
    self.updated_at = Utc::now();
    Ok(line)
  }

  /// Replaces the quantity of an existing line. `None` if the book is not in
  /// the cart.
  pub fn set_quantity(&mut self, book_id: Uuid, quantity: i32) -> Option<CartLine> {
    let line = self.lines.iter_mut().find(|l| l.book_id == book_id)?;
    line.quantity = quantity;
    let updated = line.clone();
    self.updated_at = Utc::now();
    Some(updated)
  }

  /// Removes the line for a book, returning it if it was present.
  pub fn remove(&mut self, book_id: Uuid) -> Option<CartLine> {
    let idx = self.lines.iter().position(|l| l.book_id == book_id)?;
    self.updated_at = Utc::now();
    Some(self.lines.remove(idx))
  }

  pub fn total_cents(&self) -> Result<i64> {
    sum_cents(self.lines.iter().map(CartLine::line_total_cents))
  }

  pub fn book_ids(&self) -> Vec<Uuid> {
    self.lines.iter().map(|l| l.book_id).collect()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
  pub book_id: Uuid,
  /// `None` when the book has since been removed from the catalog.
  pub title: Option<String>,
  pub author: Option<String>,
  pub quantity: i32,
  pub price_cents: i64,
  pub total_price_cents: i64,
}

/// Cart as shown to its owner: lines joined with current book details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
  pub lines: Vec<CartLineView>,
  pub total_cart_price_cents: i64,
}

impl CartView {
  pub fn build(cart: &Cart, books: &HashMap<Uuid, Book>) -> Result<Self> {
    let lines = cart
      .lines
      .iter()
      .map(|line| {
        let book = books.get(&line.book_id);
        Ok(CartLineView {
          book_id: line.book_id,
          title: book.map(|b| b.title.clone()),
          author: book.map(|b| b.author.clone()),
          quantity: line.quantity,
          price_cents: line.price_cents,
          total_price_cents: line.line_total_cents()?,
        })
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(CartView {
      lines,
      total_cart_price_cents: cart.total_cents()?,
    })
  }
}
