// bookstore/src/store/memory.rs

//! Process-local store. Used by tests and when no database is configured.

use super::{BookRepository, CartRepository, FavoriteRepository, OrderRepository, ReviewRepository, UserRepository};
use crate::error::{BookstoreError, Result};
use crate::models::{Book, Cart, Favorite, Order, Review, User};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
  users: RwLock<HashMap<Uuid, User>>,
  books: RwLock<HashMap<Uuid, Book>>,
  carts: RwLock<HashMap<Uuid, Cart>>,
  orders: RwLock<HashMap<Uuid, Order>>,
  reviews: RwLock<HashMap<Uuid, Review>>,
  favorites: RwLock<HashMap<Uuid, Favorite>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored orders across all users.
  pub fn order_count(&self) -> usize {
    self.orders.read().len()
  }
}

#[async_trait]
impl UserRepository for MemoryStore {
  async fn insert_user(&self, user: &User) -> Result<()> {
    let mut users = self.users.write();
    if users
      .values()
      .any(|u| u.email == user.email || u.username == user.username)
    {
      return Err(BookstoreError::AlreadyExists("User already exists".to_string()));
    }
    users.insert(user.id, user.clone());
    Ok(())
  }

  async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
    Ok(self.users.read().get(&id).cloned())
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.users.read().values().find(|u| u.email == email).cloned())
  }

  async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
    Ok(self.users.read().values().find(|u| u.username == username).cloned())
  }

  async fn update_user(&self, user: &User) -> Result<()> {
    match self.users.write().get_mut(&user.id) {
      Some(slot) => {
        *slot = user.clone();
        Ok(())
      }
      None => Err(BookstoreError::not_found("User not found")),
    }
  }

  async fn delete_user(&self, id: Uuid) -> Result<bool> {
    let existed = self.users.write().remove(&id).is_some();
    if existed {
      self.carts.write().remove(&id);
      self.reviews.write().retain(|_, r| r.user_id != id);
      self.favorites.write().retain(|_, f| f.user_id != id);
      debug!(user_id = %id, "Removed user and dependent records.");
    }
    Ok(existed)
  }
}

#[async_trait]
impl BookRepository for MemoryStore {
  async fn insert_book(&self, book: &Book) -> Result<()> {
    let mut books = self.books.write();
    if books.values().any(|b| b.isbn == book.isbn) {
      return Err(BookstoreError::AlreadyExists(
        "Book with this ISBN already exists".to_string(),
      ));
    }
    books.insert(book.id, book.clone());
    Ok(())
  }

  async fn find_book(&self, id: Uuid) -> Result<Option<Book>> {
    Ok(self.books.read().get(&id).cloned())
  }

  async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
    Ok(self.books.read().values().find(|b| b.isbn == isbn).cloned())
  }

  async fn find_books(&self, ids: &[Uuid]) -> Result<Vec<Book>> {
    let books = self.books.read();
    Ok(ids.iter().filter_map(|id| books.get(id).cloned()).collect())
  }

  async fn list_books(&self) -> Result<Vec<Book>> {
    let mut books: Vec<Book> = self.books.read().values().cloned().collect();
    books.sort_by(|a, b| a.title.cmp(&b.title).then(a.created_at.cmp(&b.created_at)));
    Ok(books)
  }

  async fn update_book(&self, book: &Book) -> Result<()> {
    match self.books.write().get_mut(&book.id) {
      Some(slot) => {
        *slot = book.clone();
        Ok(())
      }
      None => Err(BookstoreError::not_found("Book not found")),
    }
  }

  async fn delete_book(&self, id: Uuid) -> Result<bool> {
    let existed = self.books.write().remove(&id).is_some();
    if existed {
      self.reviews.write().retain(|_, r| r.book_id != id);
      self.favorites.write().retain(|_, f| f.book_id != id);
    }
    Ok(existed)
  }
}

#[async_trait]
impl CartRepository for MemoryStore {
  async fn find_cart(&self, user_id: Uuid) -> Result<Option<Cart>> {
    Ok(self.carts.read().get(&user_id).cloned())
  }

  async fn save_cart(&self, cart: &Cart) -> Result<()> {
    self.carts.write().insert(cart.user_id, cart.clone());
    Ok(())
  }

  async fn delete_cart(&self, user_id: Uuid) -> Result<bool> {
    Ok(self.carts.write().remove(&user_id).is_some())
  }
}

#[async_trait]
impl OrderRepository for MemoryStore {
  async fn commit_order(&self, order: &Order) -> Result<()> {
    // Both locks are held together so no reader sees the order without the emptied cart.
    let mut orders = self.orders.write();
    let mut carts = self.carts.write();
    orders.insert(order.id, order.clone());
    if let Some(cart) = carts.get_mut(&order.user_id) {
      cart.lines.clear();
      cart.updated_at = Utc::now();
    }
    Ok(())
  }

  async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
    Ok(self.orders.read().get(&id).cloned())
  }

  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
    let mut orders: Vec<Order> = self
      .orders
      .read()
      .values()
      .filter(|o| o.user_id == user_id)
      .cloned()
      .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
  }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
  async fn insert_review(&self, review: &Review) -> Result<()> {
    self.reviews.write().insert(review.id, review.clone());
    Ok(())
  }

  async fn find_review(&self, id: Uuid) -> Result<Option<Review>> {
    Ok(self.reviews.read().get(&id).cloned())
  }

  async fn list_reviews_for_book(&self, book_id: Uuid) -> Result<Vec<Review>> {
    let mut reviews: Vec<Review> = self
      .reviews
      .read()
      .values()
      .filter(|r| r.book_id == book_id)
      .cloned()
      .collect();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(reviews)
  }

  async fn update_review(&self, review: &Review) -> Result<()> {
    match self.reviews.write().get_mut(&review.id) {
      Some(slot) => {
        *slot = review.clone();
        Ok(())
      }
      None => Err(BookstoreError::not_found("Review not found")),
    }
  }

  async fn delete_review(&self, id: Uuid) -> Result<bool> {
    Ok(self.reviews.write().remove(&id).is_some())
  }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
  async fn insert_favorite(&self, favorite: &Favorite) -> Result<()> {
    let mut favorites = self.favorites.write();
    if favorites
      .values()
      .any(|f| f.user_id == favorite.user_id && f.book_id == favorite.book_id)
    {
      return Err(BookstoreError::AlreadyExists("Book is already in favorites".to_string()));
    }
    favorites.insert(favorite.id, favorite.clone());
    Ok(())
  }

  async fn find_favorite(&self, id: Uuid) -> Result<Option<Favorite>> {
    Ok(self.favorites.read().get(&id).cloned())
  }

  async fn find_favorite_for(&self, user_id: Uuid, book_id: Uuid) -> Result<Option<Favorite>> {
    Ok(
      self
        .favorites
        .read()
        .values()
        .find(|f| f.user_id == user_id && f.book_id == book_id)
        .cloned(),
    )
  }

  async fn list_favorites_for_user(&self, user_id: Uuid) -> Result<Vec<Favorite>> {
    let mut favorites: Vec<Favorite> = self
      .favorites
      .read()
      .values()
      .filter(|f| f.user_id == user_id)
      .cloned()
      .collect();
    favorites.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(favorites)
  }

  async fn delete_favorite(&self, id: Uuid) -> Result<bool> {
    Ok(self.favorites.write().remove(&id).is_some())
  }
}
