// bookstore/src/store/mod.rs

//! Persistence collaborator interface.
//!
//! One repository trait per collection; [`Store`] bundles them so services
//! can hold a single `Arc<dyn Store>`. Implementations: [`MemoryStore`] here
//! and the PostgreSQL store of the server crate.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{Book, Cart, Favorite, Order, Review, User};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn insert_user(&self, user: &User) -> Result<()>;
  async fn find_user(&self, id: Uuid) -> Result<Option<User>>;
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
  async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
  async fn update_user(&self, user: &User) -> Result<()>;
  /// Removes the account together with its cart, reviews and favorites.
  /// Placed orders are kept. Returns whether the user existed.
  async fn delete_user(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait BookRepository: Send + Sync {
  async fn insert_book(&self, book: &Book) -> Result<()>;
  async fn find_book(&self, id: Uuid) -> Result<Option<Book>>;
  async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>>;
  /// Books with the given ids; unknown ids are silently absent.
  async fn find_books(&self, ids: &[Uuid]) -> Result<Vec<Book>>;
  /// All books ordered by title.
  async fn list_books(&self) -> Result<Vec<Book>>;
  async fn update_book(&self, book: &Book) -> Result<()>;
  /// Removes the book with its reviews and favorites. Cart and order lines
  /// keep their book id. Returns whether the book existed.
  async fn delete_book(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
  async fn find_cart(&self, user_id: Uuid) -> Result<Option<Cart>>;
  /// Creates or fully replaces the user's cart.
  async fn save_cart(&self, cart: &Cart) -> Result<()>;
  async fn delete_cart(&self, user_id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
  /// Stores `order` and empties its owner's cart as one unit: either both
  /// changes are visible afterwards or neither is.
  async fn commit_order(&self, order: &Order) -> Result<()>;
  async fn find_order(&self, id: Uuid) -> Result<Option<Order>>;
  /// The user's orders, newest first.
  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
  async fn insert_review(&self, review: &Review) -> Result<()>;
  async fn find_review(&self, id: Uuid) -> Result<Option<Review>>;
  /// Reviews of a book, newest first.
  async fn list_reviews_for_book(&self, book_id: Uuid) -> Result<Vec<Review>>;
  async fn update_review(&self, review: &Review) -> Result<()>;
  async fn delete_review(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
  async fn insert_favorite(&self, favorite: &Favorite) -> Result<()>;
  async fn find_favorite(&self, id: Uuid) -> Result<Option<Favorite>>;
  async fn find_favorite_for(&self, user_id: Uuid, book_id: Uuid) -> Result<Option<Favorite>>;
  /// The user's favorites, oldest first.
  async fn list_favorites_for_user(&self, user_id: Uuid) -> Result<Vec<Favorite>>;
  async fn delete_favorite(&self, id: Uuid) -> Result<bool>;
}

/// Every repository at once.
pub trait Store:
  UserRepository + BookRepository + CartRepository + OrderRepository + ReviewRepository + FavoriteRepository
{
}

impl<T> Store for T where
  T: UserRepository + BookRepository + CartRepository + OrderRepository + ReviewRepository + FavoriteRepository
{
}

/// Loads the books referenced by `ids` into a lookup map.
pub async fn books_by_id(store: &dyn Store, ids: &[Uuid]) -> Result<HashMap<Uuid, Book>> {
  if ids.is_empty() {
    return Ok(HashMap::new());
  }
  let books = store.find_books(ids).await?;
  Ok(books.into_iter().map(|b| (b.id, b)).collect())
}
