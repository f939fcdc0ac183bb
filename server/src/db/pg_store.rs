// bookstore_server/src/db/pg_store.rs

//! PostgreSQL implementation of the bookstore repositories.

use super::rows::{BookRow, CartRow, FavoriteRow, LineRow, OrderLineRow, OrderRow, ReviewRow, UserRow};
use async_trait::async_trait;
use bookstore::models::{Book, Cart, Favorite, Order, Review, User};
use bookstore::{
  BookRepository, BookstoreError, CartRepository, FavoriteRepository, OrderRepository, ReviewRepository,
  UserRepository,
};
use chrono::Utc;
use sqlx::{query, query_as, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

type Result<T> = std::result::Result<T, BookstoreError>;

const USER_COLUMNS: &str =
  "id, first_name, last_name, username, email, password_hash, address, role, is_active, created_at, updated_at";
const BOOK_COLUMNS: &str = "id, title, author, description, genre, quantity, price_cents, publisher_date, isbn, \
                            cover_image, created_at, updated_at";
const REVIEW_COLUMNS: &str = "id, book_id, user_id, rating, review_text, created_at, updated_at";
const FAVORITE_COLUMNS: &str = "id, user_id, book_id, created_at";

/// Maps unique-constraint violations to `AlreadyExists(message)`; anything
/// else is a storage failure.
fn conflict_or_storage(message: &'static str) -> impl Fn(sqlx::Error) -> BookstoreError {
  move |err| {
    let duplicate = matches!(&err, sqlx::Error::Database(db_err) if db_err.is_unique_violation());
    if duplicate {
      BookstoreError::AlreadyExists(message.to_string())
    } else {
      BookstoreError::storage(err)
    }
  }
}

#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
    self.pool.begin().await.map_err(BookstoreError::storage)
  }

  async fn lines_for_orders(&self, order_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<OrderLineRow>>> {
    let rows = query_as::<_, OrderLineRow>(
      "SELECT order_id, book_id, quantity, price_cents FROM order_lines \
       WHERE order_id = ANY($1) ORDER BY order_id, position",
    )
    .bind(order_ids.to_vec())
    .fetch_all(&self.pool)
    .await
    .map_err(BookstoreError::storage)?;

    let mut grouped: HashMap<Uuid, Vec<OrderLineRow>> = HashMap::new();
    for row in rows {
      grouped.entry(row.order_id).or_default().push(row);
    }
    Ok(grouped)
  }
}

#[async_trait]
impl UserRepository for PgStore {
  #[instrument(name = "PgStore::insert_user", skip_all, fields(user_id = %user.id), err(Display))]
  async fn insert_user(&self, user: &User) -> Result<()> {
    query(
      "INSERT INTO users (id, first_name, last_name, username, email, password_hash, address, role, is_active, \
       created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(sqlx::types::Json(&user.address))
    .bind(user.role.as_str())
    .bind(user.is_active)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(&self.pool)
    .await
    .map_err(conflict_or_storage("User already exists"))?;
    Ok(())
  }

  async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    query_as::<_, UserRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?
      .map(User::try_from)
      .transpose()
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
    query_as::<_, UserRow>(&sql)
      .bind(email)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?
      .map(User::try_from)
      .transpose()
  }

  async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
    query_as::<_, UserRow>(&sql)
      .bind(username)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?
      .map(User::try_from)
      .transpose()
  }

  async fn update_user(&self, user: &User) -> Result<()> {
    let result = query(
      "UPDATE users SET first_name = $2, last_name = $3, username = $4, email = $5, password_hash = $6, \
       address = $7, role = $8, is_active = $9, updated_at = $10 WHERE id = $1",
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(sqlx::types::Json(&user.address))
    .bind(user.role.as_str())
    .bind(user.is_active)
    .bind(user.updated_at)
    .execute(&self.pool)
    .await
    .map_err(conflict_or_storage("Email or username is already in use"))?;

    if result.rows_affected() == 0 {
      return Err(BookstoreError::not_found("User not found"));
    }
    Ok(())
  }

  #[instrument(name = "PgStore::delete_user", skip(self), err(Display))]
  async fn delete_user(&self, id: Uuid) -> Result<bool> {
    // Cart, reviews and favorites go with the user through ON DELETE CASCADE.
    let result = query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl BookRepository for PgStore {
  #[instrument(name = "PgStore::insert_book", skip_all, fields(book_id = %book.id), err(Display))]
  async fn insert_book(&self, book: &Book) -> Result<()> {
    query(
      "INSERT INTO books (id, title, author, description, genre, quantity, price_cents, publisher_date, isbn, \
       cover_image, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
    )
    .bind(book.id)
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.description)
    .bind(book.genre.as_str())
    .bind(book.quantity)
    .bind(book.price_cents)
    .bind(book.publisher_date)
    .bind(&book.isbn)
    .bind(&book.cover_image)
    .bind(book.created_at)
    .bind(book.updated_at)
    .execute(&self.pool)
    .await
    .map_err(conflict_or_storage("Book with this ISBN already exists"))?;
    Ok(())
  }

  async fn find_book(&self, id: Uuid) -> Result<Option<Book>> {
    let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
    query_as::<_, BookRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?
      .map(Book::try_from)
      .transpose()
  }

  async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
    let sql = format!("SELECT {} FROM books WHERE isbn = $1", BOOK_COLUMNS);
    query_as::<_, BookRow>(&sql)
      .bind(isbn)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?
      .map(Book::try_from)
      .transpose()
  }

  async fn find_books(&self, ids: &[Uuid]) -> Result<Vec<Book>> {
    let sql = format!("SELECT {} FROM books WHERE id = ANY($1)", BOOK_COLUMNS);
    query_as::<_, BookRow>(&sql)
      .bind(ids.to_vec())
      .fetch_all(&self.pool)
      .await
      .map_err(BookstoreError::storage)?
      .into_iter()
      .map(Book::try_from)
      .collect()
  }

  async fn list_books(&self) -> Result<Vec<Book>> {
    let sql = format!("SELECT {} FROM books ORDER BY title, id", BOOK_COLUMNS);
    query_as::<_, BookRow>(&sql)
      .fetch_all(&self.pool)
      .await
      .map_err(BookstoreError::storage)?
      .into_iter()
      .map(Book::try_from)
      .collect()
  }

  async fn update_book(&self, book: &Book) -> Result<()> {
    let result = query(
      "UPDATE books SET title = $2, author = $3, description = $4, genre = $5, quantity = $6, price_cents = $7, \
       publisher_date = $8, isbn = $9, cover_image = $10, updated_at = $11 WHERE id = $1",
    )
    .bind(book.id)
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.description)
    .bind(book.genre.as_str())
    .bind(book.quantity)
    .bind(book.price_cents)
    .bind(book.publisher_date)
    .bind(&book.isbn)
    .bind(&book.cover_image)
    .bind(book.updated_at)
    .execute(&self.pool)
    .await
    .map_err(conflict_or_storage("Book with this ISBN already exists"))?;

    if result.rows_affected() == 0 {
      return Err(BookstoreError::not_found("Book not found"));
    }
    Ok(())
  }

  #[instrument(name = "PgStore::delete_book", skip(self), err(Display))]
  async fn delete_book(&self, id: Uuid) -> Result<bool> {
    let result = query("DELETE FROM books WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl CartRepository for PgStore {
  async fn find_cart(&self, user_id: Uuid) -> Result<Option<Cart>> {
    let header = query_as::<_, CartRow>("SELECT user_id, created_at, updated_at FROM carts WHERE user_id = $1")
      .bind(user_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    let Some(header) = header else {
      return Ok(None);
    };

    let lines = query_as::<_, LineRow>(
      "SELECT book_id, quantity, price_cents FROM cart_lines WHERE user_id = $1 ORDER BY position",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(BookstoreError::storage)?;
    Ok(Some(header.into_cart(lines)))
  }

  #[instrument(name = "PgStore::save_cart", skip_all, fields(user_id = %cart.user_id, lines = cart.lines.len()), err(Display))]
  async fn save_cart(&self, cart: &Cart) -> Result<()> {
    let mut tx = self.begin().await?;

    query(
      "INSERT INTO carts (user_id, created_at, updated_at) VALUES ($1, $2, $3) \
       ON CONFLICT (user_id) DO UPDATE SET updated_at = EXCLUDED.updated_at",
    )
    .bind(cart.user_id)
    .bind(cart.created_at)
    .bind(cart.updated_at)
    .execute(&mut *tx)
    .await
    .map_err(BookstoreError::storage)?;

    query("DELETE FROM cart_lines WHERE user_id = $1")
      .bind(cart.user_id)
      .execute(&mut *tx)
      .await
      .map_err(BookstoreError::storage)?;

    for (position, line) in cart.lines.iter().enumerate() {
      query(
        "INSERT INTO cart_lines (user_id, position, book_id, quantity, price_cents) VALUES ($1, $2, $3, $4, $5)",
      )
      .bind(cart.user_id)
      .bind(position as i32)
      .bind(line.book_id)
      .bind(line.quantity)
      .bind(line.price_cents)
      .execute(&mut *tx)
      .await
      .map_err(BookstoreError::storage)?;
    }

    tx.commit().await.map_err(BookstoreError::storage)
  }

  async fn delete_cart(&self, user_id: Uuid) -> Result<bool> {
    let result = query("DELETE FROM carts WHERE user_id = $1")
      .bind(user_id)
      .execute(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl OrderRepository for PgStore {
  #[instrument(name = "PgStore::commit_order", skip_all, fields(order_id = %order.id, user_id = %order.user_id), err(Display))]
  async fn commit_order(&self, order: &Order) -> Result<()> {
    let mut tx = self.begin().await?;

    query("INSERT INTO orders (id, user_id, total_cents, created_at) VALUES ($1, $2, $3, $4)")
      .bind(order.id)
      .bind(order.user_id)
      .bind(order.total_cents)
      .bind(order.created_at)
      .execute(&mut *tx)
      .await
      .map_err(BookstoreError::storage)?;

    for (position, line) in order.lines.iter().enumerate() {
      query(
        "INSERT INTO order_lines (order_id, position, book_id, quantity, price_cents) VALUES ($1, $2, $3, $4, $5)",
      )
      .bind(order.id)
      .bind(position as i32)
      .bind(line.book_id)
      .bind(line.quantity)
      .bind(line.price_cents)
      .execute(&mut *tx)
      .await
      .map_err(BookstoreError::storage)?;
    }

    query("DELETE FROM cart_lines WHERE user_id = $1")
      .bind(order.user_id)
      .execute(&mut *tx)
      .await
      .map_err(BookstoreError::storage)?;
    query("UPDATE carts SET updated_at = $2 WHERE user_id = $1")
      .bind(order.user_id)
      .bind(Utc::now())
      .execute(&mut *tx)
      .await
      .map_err(BookstoreError::storage)?;

    // Dropping `tx` on any early return above rolls everything back.
    tx.commit().await.map_err(BookstoreError::storage)?;
    debug!("Order stored and cart emptied.");
    Ok(())
  }

  async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
    let header = query_as::<_, OrderRow>("SELECT id, user_id, total_cents, created_at FROM orders WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    let Some(header) = header else {
      return Ok(None);
    };

    let mut lines = self.lines_for_orders(&[id]).await?;
    let lines = lines.remove(&id).unwrap_or_default();
    Ok(Some(header.into_order(lines)))
  }

  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
    let headers = query_as::<_, OrderRow>(
      "SELECT id, user_id, total_cents, created_at FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(BookstoreError::storage)?;
    if headers.is_empty() {
      return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
    let mut lines = self.lines_for_orders(&ids).await?;
    Ok(
      headers
        .into_iter()
        .map(|h| {
          let order_lines = lines.remove(&h.id).unwrap_or_default();
          h.into_order(order_lines)
        })
        .collect(),
    )
  }
}

#[async_trait]
impl ReviewRepository for PgStore {
  async fn insert_review(&self, review: &Review) -> Result<()> {
    query(
      "INSERT INTO reviews (id, book_id, user_id, rating, review_text, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(review.id)
    .bind(review.book_id)
    .bind(review.user_id)
    .bind(review.rating)
    .bind(&review.review_text)
    .bind(review.created_at)
    .bind(review.updated_at)
    .execute(&self.pool)
    .await
    .map_err(BookstoreError::storage)?;
    Ok(())
  }

  async fn find_review(&self, id: Uuid) -> Result<Option<Review>> {
    let sql = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
    let row = query_as::<_, ReviewRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(row.map(Review::from))
  }

  async fn list_reviews_for_book(&self, book_id: Uuid) -> Result<Vec<Review>> {
    let sql = format!("SELECT {} FROM reviews WHERE book_id = $1 ORDER BY created_at DESC", REVIEW_COLUMNS);
    let rows = query_as::<_, ReviewRow>(&sql)
      .bind(book_id)
      .fetch_all(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(rows.into_iter().map(Review::from).collect())
  }

  async fn update_review(&self, review: &Review) -> Result<()> {
    let result = query("UPDATE reviews SET rating = $2, review_text = $3, updated_at = $4 WHERE id = $1")
      .bind(review.id)
      .bind(review.rating)
      .bind(&review.review_text)
      .bind(review.updated_at)
      .execute(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    if result.rows_affected() == 0 {
      return Err(BookstoreError::not_found("Review not found"));
    }
    Ok(())
  }

  async fn delete_review(&self, id: Uuid) -> Result<bool> {
    let result = query("DELETE FROM reviews WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl FavoriteRepository for PgStore {
  async fn insert_favorite(&self, favorite: &Favorite) -> Result<()> {
    query("INSERT INTO favorites (id, user_id, book_id, created_at) VALUES ($1, $2, $3, $4)")
      .bind(favorite.id)
      .bind(favorite.user_id)
      .bind(favorite.book_id)
      .bind(favorite.created_at)
      .execute(&self.pool)
      .await
      .map_err(conflict_or_storage("Book is already in favorites"))?;
    Ok(())
  }

  async fn find_favorite(&self, id: Uuid) -> Result<Option<Favorite>> {
    let sql = format!("SELECT {} FROM favorites WHERE id = $1", FAVORITE_COLUMNS);
    let row = query_as::<_, FavoriteRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(row.map(Favorite::from))
  }

  async fn find_favorite_for(&self, user_id: Uuid, book_id: Uuid) -> Result<Option<Favorite>> {
    let sql = format!("SELECT {} FROM favorites WHERE user_id = $1 AND book_id = $2", FAVORITE_COLUMNS);
    let row = query_as::<_, FavoriteRow>(&sql)
      .bind(user_id)
      .bind(book_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(row.map(Favorite::from))
  }

  async fn list_favorites_for_user(&self, user_id: Uuid) -> Result<Vec<Favorite>> {
    let sql = format!("SELECT {} FROM favorites WHERE user_id = $1 ORDER BY created_at", FAVORITE_COLUMNS);
    let rows = query_as::<_, FavoriteRow>(&sql)
      .bind(user_id)
      .fetch_all(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(rows.into_iter().map(Favorite::from).collect())
  }

  async fn delete_favorite(&self, id: Uuid) -> Result<bool> {
    let result = query("DELETE FROM favorites WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(BookstoreError::storage)?;
    Ok(result.rows_affected() > 0)
  }
}
