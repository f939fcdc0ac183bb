// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use bookstore::models::{Address, Book, Cart, Favorite, Genre, Order, OrderView, Review, Role, User};
use bookstore::workflow::{ContextData, Handler, PipelineControl, WorkflowError};
use bookstore::{
  BookRepository, Bookstore, BookstoreError, CartRepository, FavoriteRepository, MemoryStore, Notifier,
  OrderRepository, ReviewRepository, Store, UserRepository,
};
use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Engine test context ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Workflow error: {0}")]
  Workflow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<WorkflowError> for TestError {
  fn from(e: WorkflowError) -> Self {
    TestError::Workflow(format!("{:?}", e))
  }
}

pub fn create_simple_handler(step_name: &'static str, message_to_append: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(step_name: &'static str, error_message: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

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

// --- Notifiers ---

/// Records every confirmation it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
  pub sent: Mutex<Vec<(String, OrderView)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
  async fn send_order_confirmation(&self, email: &str, order: &OrderView) -> Result<(), BookstoreError> {
    self.sent.lock().push((email.to_string(), order.clone()));
    Ok(())
  }
}

/// Always fails delivery.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
  async fn send_order_confirmation(&self, _email: &str, _order: &OrderView) -> Result<(), BookstoreError> {
    Err(BookstoreError::Notification("mail relay unreachable".to_string()))
  }
}

// --- Stores ---

/// A [`MemoryStore`] whose `commit_order` always fails with a storage error.
#[derive(Default)]
pub struct FailingCommitStore {
  pub inner: MemoryStore,
}

#[async_trait]
impl UserRepository for FailingCommitStore {
  async fn insert_user(&self, user: &User) -> Result<(), BookstoreError> {
    self.inner.insert_user(user).await
  }
  async fn find_user(&self, id: Uuid) -> Result<Option<User>, BookstoreError> {
    self.inner.find_user(id).await
  }
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, BookstoreError> {
    self.inner.find_user_by_email(email).await
  }
  async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, BookstoreError> {
    self.inner.find_user_by_username(username).await
  }
  async fn update_user(&self, user: &User) -> Result<(), BookstoreError> {
    self.inner.update_user(user).await
  }
  async fn delete_user(&self, id: Uuid) -> Result<bool, BookstoreError> {
    self.inner.delete_user(id).await
  }
}

#[async_trait]
impl BookRepository for FailingCommitStore {
  async fn insert_book(&self, book: &Book) -> Result<(), BookstoreError> {
    self.inner.insert_book(book).await
  }
  async fn find_book(&self, id: Uuid) -> Result<Option<Book>, BookstoreError> {
    self.inner.find_book(id).await
  }
  async fn find_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, BookstoreError> {
    self.inner.find_book_by_isbn(isbn).await
  }
  async fn find_books(&self, ids: &[Uuid]) -> Result<Vec<Book>, BookstoreError> {
    self.inner.find_books(ids).await
  }
  async fn list_books(&self) -> Result<Vec<Book>, BookstoreError> {
    self.inner.list_books().await
  }
  async fn update_book(&self, book: &Book) -> Result<(), BookstoreError> {
    self.inner.update_book(book).await
  }
  async fn delete_book(&self, id: Uuid) -> Result<bool, BookstoreError> {
    self.inner.delete_book(id).await
  }
}

#[async_trait]
impl CartRepository for FailingCommitStore {
  async fn find_cart(&self, user_id: Uuid) -> Result<Option<Cart>, BookstoreError> {
    self.inner.find_cart(user_id).await
  }
  async fn save_cart(&self, cart: &Cart) -> Result<(), BookstoreError> {
    self.inner.save_cart(cart).await
  }
  async fn delete_cart(&self, user_id: Uuid) -> Result<bool, BookstoreError> {
    self.inner.delete_cart(user_id).await
  }
}

#[async_trait]
impl OrderRepository for FailingCommitStore {
  async fn commit_order(&self, _order: &Order) -> Result<(), BookstoreError> {
    Err(BookstoreError::storage(anyhow::anyhow!("connection reset during commit")))
  }
  async fn find_order(&self, id: Uuid) -> Result<Option<Order>, BookstoreError> {
    self.inner.find_order(id).await
  }
  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, BookstoreError> {
    self.inner.list_orders_for_user(user_id).await
  }
}

#[async_trait]
impl ReviewRepository for FailingCommitStore {
  async fn insert_review(&self, review: &Review) -> Result<(), BookstoreError> {
    self.inner.insert_review(review).await
  }
  async fn find_review(&self, id: Uuid) -> Result<Option<Review>, BookstoreError> {
    self.inner.find_review(id).await
  }
  async fn list_reviews_for_book(&self, book_id: Uuid) -> Result<Vec<Review>, BookstoreError> {
    self.inner.list_reviews_for_book(book_id).await
  }
  async fn update_review(&self, review: &Review) -> Result<(), BookstoreError> {
    self.inner.update_review(review).await
  }
  async fn delete_review(&self, id: Uuid) -> Result<bool, BookstoreError> {
    self.inner.delete_review(id).await
  }
}

#[async_trait]
impl FavoriteRepository for FailingCommitStore {
  async fn insert_favorite(&self, favorite: &Favorite) -> Result<(), BookstoreError> {
    self.inner.insert_favorite(favorite).await
  }
  async fn find_favorite(&self, id: Uuid) -> Result<Option<Favorite>, BookstoreError> {
    self.inner.find_favorite(id).await
  }
  async fn find_favorite_for(&self, user_id: Uuid, book_id: Uuid) -> Result<Option<Favorite>, BookstoreError> {
    self.inner.find_favorite_for(user_id, book_id).await
  }
  async fn list_favorites_for_user(&self, user_id: Uuid) -> Result<Vec<Favorite>, BookstoreError> {
    self.inner.list_favorites_for_user(user_id).await
  }
  async fn delete_favorite(&self, id: Uuid) -> Result<bool, BookstoreError> {
    self.inner.delete_favorite(id).await
  }
}

// --- Fixtures ---

pub struct TestShop {
  pub store: Arc<MemoryStore>,
  pub notifier: Arc<RecordingNotifier>,
  pub shop: Bookstore,
}

pub fn shop() -> TestShop {
  let store = Arc::new(MemoryStore::new());
  let notifier = Arc::new(RecordingNotifier::default());
  let shop = Bookstore::new(store.clone(), notifier.clone()).expect("pipelines register");
  TestShop { store, notifier, shop }
}

pub fn shop_with_notifier(notifier: Arc<dyn Notifier>) -> (Arc<MemoryStore>, Bookstore) {
  let store = Arc::new(MemoryStore::new());
  let shop = Bookstore::new(store.clone(), notifier).expect("pipelines register");
  (store, shop)
}

pub fn sample_address() -> Address {
  Address {
    city: "Lisbon".to_string(),
    street: "Rua Augusta".to_string(),
    house_number: "12".to_string(),
    apartment_number: Some("3B".to_string()),
    postal_code: "1100-053".to_string(),
    country: "Portugal".to_string(),
  }
}

pub fn make_user(username: &str, role: Role) -> User {
  let now = Utc::now();
  User {
    id: Uuid::new_v4(),
    first_name: "Test".to_string(),
    last_name: "Reader".to_string(),
    username: username.to_string(),
    email: format!("{}@example.com", username),
    password_hash: "not-a-real-hash".to_string(),
    address: sample_address(),
    role,
    is_active: true,
    created_at: now,
    updated_at: now,
  }
}

pub async fn insert_user(store: &dyn Store, username: &str, role: Role) -> User {
  let user = make_user(username, role);
  store.insert_user(&user).await.expect("insert user");
  user
}

pub fn make_book(title: &str, price_cents: i64) -> Book {
  let now = Utc::now();
  Book {
    id: Uuid::new_v4(),
    title: title.to_string(),
    author: format!("Author of {}", title),
    description: "A book used in tests.".to_string(),
    genre: Genre::Fiction,
    quantity: 10,
    price_cents,
    publisher_date: NaiveDate::from_ymd_opt(2020, 5, 17).unwrap_or_default(),
    isbn: Uuid::new_v4().simple().to_string(),
    cover_image: String::new(),
    created_at: now,
    updated_at: now,
  }
}

pub async fn insert_book(store: &dyn Store, title: &str, price_cents: i64) -> Book {
  let book = make_book(title, price_cents);
  store.insert_book(&book).await.expect("insert book");
  book
}
