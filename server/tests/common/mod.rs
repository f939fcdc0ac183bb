// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use bookstore::models::{Address, Book, BookDraft, Genre, NewUser, Role, User};
use bookstore::{BookRepository, MemoryStore};
use bookstore_server::config::AppConfig;
use bookstore_server::services::MockMailer;
use bookstore_server::state::AppState;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

pub const PASSWORD: &str = "Secr3t!pass";

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Application state ---
pub struct TestApp {
  pub state: AppState,
  pub store: Arc<MemoryStore>,
  pub mailer: Arc<MockMailer>,
}

pub fn test_app() -> TestApp {
  let store = Arc::new(MemoryStore::new());
  let mailer = Arc::new(MockMailer::new("shop@test.local"));
  let state = AppState::new(store.clone(), mailer.clone(), Arc::new(AppConfig::default()))
    .expect("app state should build");
  TestApp { state, store, mailer }
}

pub fn sample_address() -> Address {
  Address {
    city: "Springfield".to_string(),
    street: "Evergreen Terrace".to_string(),
    house_number: "742".to_string(),
    apartment_number: None,
    postal_code: "49007".to_string(),
    country: "USA".to_string(),
  }
}

pub fn new_user(username: &str) -> NewUser {
  NewUser {
    first_name: "Test".to_string(),
    last_name: "Reader".to_string(),
    username: username.to_string(),
    email: format!("{}@example.com", username),
    password: PASSWORD.to_string(),
    address: sample_address(),
  }
}

/// Creates an account directly and opens a session for it.
pub async fn signed_in(app: &TestApp, username: &str, role: Role) -> (User, String) {
  let user = app
    .state
    .accounts
    .create_user(new_user(username), role)
    .await
    .expect("user should be created");
  let (token, _) = app
    .state
    .accounts
    .login(&user.email, PASSWORD)
    .await
    .expect("login should succeed");
  (user, token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

pub fn book_json(title: &str, isbn: &str, price_cents: i64) -> serde_json::Value {
  serde_json::json!({
    "title": title,
    "author": "Some Author",
    "description": "A book used in tests.",
    "genre": "Fiction",
    "quantity": 10,
    "priceCents": price_cents,
    "publisherDate": "2001-02-03",
    "isbn": isbn,
  })
}

pub async fn insert_book(store: &MemoryStore, title: &str, price_cents: i64) -> Book {
  let draft = BookDraft {
    title: title.to_string(),
    author: "Some Author".to_string(),
    description: "A book used in tests.".to_string(),
    genre: Genre::Fiction.as_str().to_string(),
    quantity: 10,
    price_cents,
    publisher_date: NaiveDate::from_ymd_opt(2001, 2, 3).expect("valid date"),
    isbn: format!("isbn-{}", title),
    cover_image: String::new(),
  };
  let book = Book::from_draft(draft, Genre::Fiction);
  store.insert_book(&book).await.expect("book should insert");
  book
}
