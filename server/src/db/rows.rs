// bookstore_server/src/db/rows.rs

//! Row shapes as stored in PostgreSQL and their conversion into domain types.

use bookstore::models::{Address, Book, Cart, CartLine, Favorite, Genre, Order, OrderLine, Review, Role, User};
use bookstore::BookstoreError;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

fn corrupt(what: &str, value: &str) -> BookstoreError {
  BookstoreError::storage(anyhow::anyhow!("Stored {} has unexpected value '{}'", what, value))
}

#[derive(Debug, FromRow)]
pub struct UserRow {
  pub id: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub username: String,
  pub email: String,
  pub password_hash: String,
  pub address: Json<Address>,
  pub role: String,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
  type Error = BookstoreError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    let role = Role::parse(&row.role).ok_or_else(|| corrupt("user role", &row.role))?;
    Ok(User {
      id: row.id,
      first_name: row.first_name,
      last_name: row.last_name,
      username: row.username,
      email: row.email,
      password_hash: row.password_hash,
      address: row.address.0,
      role,
      is_active: row.is_active,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
pub struct BookRow {
  pub id: Uuid,
  pub title: String,
  pub author: String,
  pub description: String,
  pub genre: String,
  pub quantity: i32,
  pub price_cents: i64,
  pub publisher_date: NaiveDate,
  pub isbn: String,
  pub cover_image: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
  type Error = BookstoreError;

  fn try_from(row: BookRow) -> Result<Self, Self::Error> {
    let genre: Genre = row.genre.parse().map_err(|_| corrupt("book genre", &row.genre))?;
    Ok(Book {
      id: row.id,
      title: row.title,
      author: row.author,
      description: row.description,
      genre,
      quantity: row.quantity,
      price_cents: row.price_cents,
      publisher_date: row.publisher_date,
      isbn: row.isbn,
      cover_image: row.cover_image,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
pub struct CartRow {
  pub user_id: Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct LineRow {
  pub book_id: Uuid,
  pub quantity: i32,
  pub price_cents: i64,
}

impl CartRow {
  pub fn into_cart(self, lines: Vec<LineRow>) -> Cart {
    Cart {
      user_id: self.user_id,
      lines: lines
        .into_iter()
        .map(|l| CartLine {
          book_id: l.book_id,
          quantity: l.quantity,
          price_cents: l.price_cents,
        })
        .collect(),
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
  pub id: Uuid,
  pub user_id: Uuid,
  pub total_cents: i64,
  pub created_at: DateTime<Utc>,
}

/// An order line tagged with its order, for batch loads.
#[derive(Debug, FromRow)]
pub struct OrderLineRow {
  pub order_id: Uuid,
  pub book_id: Uuid,
  pub quantity: i32,
  pub price_cents: i64,
}

impl OrderRow {
  pub fn into_order(self, lines: Vec<OrderLineRow>) -> Order {
    Order {
      id: self.id,
      user_id: self.user_id,
      lines: lines
        .into_iter()
        .map(|l| OrderLine {
          book_id: l.book_id,
          quantity: l.quantity,
          price_cents: l.price_cents,
        })
        .collect(),
      total_cents: self.total_cents,
      created_at: self.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct ReviewRow {
  pub id: Uuid,
  pub book_id: Uuid,
  pub user_id: Uuid,
  pub rating: i32,
  pub review_text: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
  fn from(row: ReviewRow) -> Self {
    Review {
      id: row.id,
      book_id: row.book_id,
      user_id: row.user_id,
      rating: row.rating,
      review_text: row.review_text,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct FavoriteRow {
  pub id: Uuid,
  pub user_id: Uuid,
  pub book_id: Uuid,
  pub created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
  fn from(row: FavoriteRow) -> Self {
    Favorite {
      id: row.id,
      user_id: row.user_id,
      book_id: row.book_id,
      created_at: row.created_at,
    }
  }
}
