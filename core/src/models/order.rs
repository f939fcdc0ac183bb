// bookstore/src/models/order.rs

use super::book::Book;
use super::cart::{line_total, sum_cents, Cart};
use crate::error::BookstoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A frozen copy of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  pub book_id: Uuid,
  pub quantity: i32,
  pub price_cents: i64,
}

impl OrderLine {
  pub fn line_total_cents(&self) -> Result<i64, BookstoreError> {
    line_total(self.quantity, self.price_cents)
  }
}

/// A placed order. Immutable once created; `total_cents` always equals the sum
/// of the line totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub lines: Vec<OrderLine>,
  pub total_cents: i64,
  pub created_at: DateTime<Utc>,
}

impl Order {
  /// Composes an order from every line of `cart`. Fails with `EmptyCart` when
  /// there is nothing to buy.
  pub fn from_cart(cart: &Cart) -> Result<Order, BookstoreError> {
    if cart.is_empty() {
      return Err(BookstoreError::EmptyCart);
    }
    let lines: Vec<OrderLine> = cart
      .lines
      .iter()
      .map(|l| OrderLine {
        book_id: l.book_id,
        quantity: l.quantity,
        price_cents: l.price_cents,
      })
      .collect();
    let total_cents = sum_cents(lines.iter().map(OrderLine::line_total_cents))?;

    Ok(Order {
      id: Uuid::new_v4(),
      user_id: cart.user_id,
      lines,
      total_cents,
      created_at: Utc::now(),
    })
  }

  pub fn book_ids(&self) -> Vec<Uuid> {
    self.lines.iter().map(|l| l.book_id).collect()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
  pub book_id: Uuid,
  pub title: Option<String>,
  pub author: Option<String>,
  pub quantity: i32,
  pub price_cents: i64,
}

/// Order with its lines joined to current book details. Also the payload of
/// the confirmation notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
  pub id: Uuid,
  pub user_id: Uuid,
  pub lines: Vec<OrderLineView>,
  pub total_cents: i64,
  pub created_at: DateTime<Utc>,
}

impl OrderView {
  pub fn build(order: &Order, books: &HashMap<Uuid, Book>) -> Self {
    let lines = order
      .lines
      .iter()
      .map(|line| {
        let book = books.get(&line.book_id);
        OrderLineView {
          book_id: line.book_id,
          title: book.map(|b| b.title.clone()),
          author: book.map(|b| b.author.clone()),
          quantity: line.quantity,
          price_cents: line.price_cents,
        }
      })
      .collect();

    OrderView {
      id: order.id,
      user_id: order.user_id,
      lines,
      total_cents: order.total_cents,
      created_at: order.created_at,
    }
  }
}
