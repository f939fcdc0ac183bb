// tests/cart_tests.rs
mod common;

use bookstore::models::Role;
use bookstore::{BookRepository, BookstoreError, CartRepository};
use common::*;
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_add_same_book_twice_increments_quantity() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let book = insert_book(&*t.store, "Dune", 1999).await;

  let first = t.shop.carts.add_line(user.id, book.id, 1).await.unwrap();
  let second = t.shop.carts.add_line(user.id, book.id, 2).await.unwrap();

  assert_eq!(first.quantity, 1);
  assert_eq!(second.quantity, 3);
  let cart = t.store.find_cart(user.id).await.unwrap().unwrap();
  assert_eq!(cart.lines.len(), 1);
  assert_eq!(cart.lines[0].quantity, 3);
}

#[tokio::test]
#[serial]
async fn test_merged_line_keeps_first_price_snapshot() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let mut book = insert_book(&*t.store, "Dune", 1000).await;

  t.shop.carts.add_line(user.id, book.id, 1).await.unwrap();
  book.price_cents = 4000;
  t.store.update_book(&book).await.unwrap();
  let line = t.shop.carts.add_line(user.id, book.id, 1).await.unwrap();

  assert_eq!(line.price_cents, 1000);
  assert_eq!(line.quantity, 2);
}

#[tokio::test]
#[serial]
async fn test_add_rejects_bad_quantity_and_unknown_book() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let book = insert_book(&*t.store, "Dune", 1000).await;

  let zero = t.shop.carts.add_line(user.id, book.id, 0).await;
  assert!(matches!(zero, Err(BookstoreError::Validation(_))));

  let missing = t.shop.carts.add_line(user.id, Uuid::new_v4(), 1).await;
  assert!(matches!(missing, Err(BookstoreError::NotFound(_))));

  // Neither failure may leave a cart behind.
  assert!(t.store.find_cart(user.id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_update_and_remove_line() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let dune = insert_book(&*t.store, "Dune", 1000).await;
  let emma = insert_book(&*t.store, "Emma", 500).await;

  assert!(matches!(
    t.shop.carts.update_line(user.id, dune.id, 2).await,
    Err(BookstoreError::NotFound(_))
  ));

  t.shop.carts.add_line(user.id, dune.id, 1).await.unwrap();
  t.shop.carts.add_line(user.id, emma.id, 1).await.unwrap();

  let updated = t.shop.carts.update_line(user.id, dune.id, 5).await.unwrap();
  assert_eq!(updated.quantity, 5);
  assert!(matches!(
    t.shop.carts.update_line(user.id, dune.id, 0).await,
    Err(BookstoreError::Validation(_))
  ));
  assert!(matches!(
    t.shop.carts.update_line(user.id, Uuid::new_v4(), 1).await,
    Err(BookstoreError::NotFound(_))
  ));

  t.shop.carts.remove_line(user.id, emma.id).await.unwrap();
  assert!(matches!(
    t.shop.carts.remove_line(user.id, emma.id).await,
    Err(BookstoreError::NotFound(_))
  ));

  let view = t.shop.carts.view(user.id).await.unwrap();
  assert_eq!(view.lines.len(), 1);
  assert_eq!(view.total_cart_price_cents, 5000);
}

#[tokio::test]
#[serial]
async fn test_clear_is_idempotent() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let book = insert_book(&*t.store, "Dune", 1000).await;

  t.shop.carts.clear(user.id).await.unwrap();
  t.shop.carts.add_line(user.id, book.id, 1).await.unwrap();
  t.shop.carts.clear(user.id).await.unwrap();
  t.shop.carts.clear(user.id).await.unwrap();

  assert!(matches!(t.shop.carts.view(user.id).await, Err(BookstoreError::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn test_view_joins_book_details_and_tolerates_deleted_books() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let dune = insert_book(&*t.store, "Dune", 1000).await;
  let emma = insert_book(&*t.store, "Emma", 500).await;

  t.shop.carts.add_line(user.id, dune.id, 2).await.unwrap();
  t.shop.carts.add_line(user.id, emma.id, 1).await.unwrap();
  t.store.delete_book(emma.id).await.unwrap();

  let view = t.shop.carts.view(user.id).await.unwrap();

  assert_eq!(view.total_cart_price_cents, 2500);
  assert_eq!(view.lines[0].title.as_deref(), Some("Dune"));
  assert_eq!(view.lines[0].total_price_cents, 2000);
  assert_eq!(view.lines[1].book_id, emma.id);
  assert!(view.lines[1].title.is_none());
  assert!(view.lines[1].author.is_none());
}

#[tokio::test]
#[serial]
async fn test_cart_view_serializes_camel_case() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let book = insert_book(&*t.store, "Dune", 1250).await;
  t.shop.carts.add_line(user.id, book.id, 2).await.unwrap();

  let json = serde_json::to_value(t.shop.carts.view(user.id).await.unwrap()).unwrap();

  assert_eq!(json["totalCartPriceCents"], 2500);
  assert_eq!(json["lines"][0]["totalPriceCents"], 2500);
  assert_eq!(json["lines"][0]["title"], "Dune");
}

#[tokio::test]
#[serial]
async fn test_oversized_cart_total_is_a_validation_error() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let book = insert_book(&*t.store, "Atlas of Everything", 5_000_000_000).await;

  t.shop.carts.add_line(user.id, book.id, i32::MAX).await.unwrap();

  assert!(matches!(t.shop.carts.view(user.id).await, Err(BookstoreError::Validation(_))));
}

#[tokio::test]
#[serial]
async fn test_merge_past_quantity_limit_is_rejected() {
  setup_tracing();
  let t = shop();
  let user = insert_user(&*t.store, "reader", Role::User).await;
  let book = insert_book(&*t.store, "Dune", 1).await;

  t.shop.carts.add_line(user.id, book.id, i32::MAX).await.unwrap();
  let merged = t.shop.carts.add_line(user.id, book.id, 1).await;
  assert!(matches!(merged, Err(BookstoreError::Validation(_))));

  let cart = t.store.find_cart(user.id).await.unwrap().unwrap();
  assert_eq!(cart.line(book.id).map(|l| l.quantity), Some(i32::MAX));
}
