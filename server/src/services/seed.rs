// bookstore_server/src/services/seed.rs

//! Optional startup data: a handful of catalog entries and an admin account.

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::services::account_service::AccountService;
use bookstore::models::{Address, Book, BookDraft, Genre, NewUser, Role};
use bookstore::{BookRepository, Store, UserRepository};
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

struct SampleBook {
  title: &'static str,
  author: &'static str,
  description: &'static str,
  genre: Genre,
  quantity: i32,
  price_cents: i64,
  published: (i32, u32, u32),
  isbn: &'static str,
}

const SAMPLE_BOOKS: &[SampleBook] = &[
  SampleBook {
    title: "Pride and Prejudice",
    author: "Jane Austen",
    description: "A comedy of manners set among the landed gentry of Regency England.",
    genre: Genre::Romance,
    quantity: 25,
    price_cents: 999,
    published: (1813, 1, 28),
    isbn: "9780141439518",
  },
  SampleBook {
    title: "Dune",
    author: "Frank Herbert",
    description: "A desert planet, a spice and the heir of a fallen house.",
    genre: Genre::ScienceFiction,
    quantity: 12,
    price_cents: 1899,
    published: (1965, 8, 1),
    isbn: "9780441172719",
  },
  SampleBook {
    title: "The Hobbit",
    author: "J. R. R. Tolkien",
    description: "Bilbo Baggins is swept into a quest for a dragon's hoard.",
    genre: Genre::Fantasy,
    quantity: 30,
    price_cents: 1450,
    published: (1937, 9, 21),
    isbn: "9780547928227",
  },
  SampleBook {
    title: "Meditations",
    author: "Marcus Aurelius",
    description: "Private notes on Stoic practice by a Roman emperor.",
    genre: Genre::Philosophy,
    quantity: 8,
    price_cents: 1100,
    published: (180, 1, 1),
    isbn: "9780812968255",
  },
];

/// Inserts the sample catalog. Books whose ISBN is already present are left alone.
#[instrument(name = "seed::seed_catalog", skip(store), err(Display))]
pub async fn seed_catalog(store: &dyn Store) -> Result<usize> {
  let mut inserted = 0;
  for sample in SAMPLE_BOOKS {
    if store.find_book_by_isbn(sample.isbn).await?.is_some() {
      continue;
    }
    let (y, m, d) = sample.published;
    let publisher_date = NaiveDate::from_ymd_opt(y, m, d)
      .ok_or_else(|| AppError::Internal(format!("Bad sample publication date for {}", sample.isbn)))?;
    let draft = BookDraft {
      title: sample.title.to_string(),
      author: sample.author.to_string(),
      description: sample.description.to_string(),
      genre: sample.genre.as_str().to_string(),
      quantity: sample.quantity,
      price_cents: sample.price_cents,
      publisher_date,
      isbn: sample.isbn.to_string(),
      cover_image: String::new(),
    };
    store.insert_book(&Book::from_draft(draft, sample.genre)).await?;
    inserted += 1;
  }
  info!(inserted, "Sample catalog seeded.");
  Ok(inserted)
}

/// Creates the configured admin account unless the email is already registered.
#[instrument(name = "seed::seed_admin", skip_all, err(Display))]
pub async fn seed_admin(accounts: &AccountService, store: &dyn Store, email: &str, password: &str) -> Result<()> {
  if store.find_user_by_email(&email.trim().to_lowercase()).await?.is_some() {
    info!("Admin account already present.");
    return Ok(());
  }
  let admin = NewUser {
    first_name: "Store".to_string(),
    last_name: "Administrator".to_string(),
    username: "admin".to_string(),
    email: email.to_string(),
    password: password.to_string(),
    address: Address {
      city: "-".to_string(),
      street: "-".to_string(),
      house_number: "-".to_string(),
      apartment_number: None,
      postal_code: "-".to_string(),
      country: "-".to_string(),
    },
  };
  let user = accounts.create_user(admin, Role::Admin).await?;
  info!(user_id = %user.id, "Admin account created.");
  Ok(())
}

/// Runs whatever seeding the configuration asks for.
pub async fn run(config: &AppConfig, accounts: &AccountService, store: &dyn Store) -> Result<()> {
  if config.seed_db {
    seed_catalog(store).await?;
  }
  match (&config.seed_admin_email, &config.seed_admin_password) {
    (Some(email), Some(password)) => seed_admin(accounts, store, email, password).await?,
    (None, None) => {}
    _ => warn!("Only one of SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD is set; skipping admin seed."),
  }
  Ok(())
}

