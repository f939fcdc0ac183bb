// bookstore/src/services/catalog_service.rs

use crate::error::{BookstoreError, Result};
use crate::models::{Book, BookDraft};
use crate::store::{BookRepository, Store, UserRepository};
use crate::validation::validate_book;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Book catalog. Reads are public; writes require an admin actor.
#[derive(Clone)]
pub struct CatalogService {
  store: Arc<dyn Store>,
}

impl CatalogService {
  pub fn new(store: Arc<dyn Store>) -> Self {
    Self { store }
  }

  async fn ensure_admin(&self, actor_id: Uuid) -> Result<()> {
    let actor = self
      .store
      .find_user(actor_id)
      .await?
      .ok_or_else(|| BookstoreError::Unauthorized("Unknown user".to_string()))?;
    if !actor.is_admin() {
      return Err(BookstoreError::Forbidden("Admin access required".to_string()));
    }
    Ok(())
  }

  pub async fn list_books(&self) -> Result<Vec<Book>> {
    self.store.list_books().await
  }

  pub async fn get_book(&self, book_id: Uuid) -> Result<Book> {
    self
      .store
      .find_book(book_id)
      .await?
      .ok_or_else(|| BookstoreError::not_found("Book not found"))
  }

  #[instrument(name = "CatalogService::add_book", skip(self, draft), err(Display))]
  pub async fn add_book(&self, actor_id: Uuid, draft: BookDraft) -> Result<Book> {
    self.ensure_admin(actor_id).await?;
    let genre = validate_book(&draft)?;
    let book = Book::from_draft(draft, genre);
    self.store.insert_book(&book).await?;
    info!(book_id = %book.id, isbn = %book.isbn, "Book added to catalog.");
    Ok(book)
  }

  #[instrument(name = "CatalogService::update_book", skip(self, draft), err(Display))]
  pub async fn update_book(&self, actor_id: Uuid, book_id: Uuid, draft: BookDraft) -> Result<Book> {
    self.ensure_admin(actor_id).await?;
    let genre = validate_book(&draft)?;
    let mut book = self.get_book(book_id).await?;
    if let Some(other) = self.store.find_book_by_isbn(draft.isbn.trim()).await? {
      if other.id != book_id {
        return Err(BookstoreError::AlreadyExists(
          "Book with this ISBN already exists".to_string(),
        ));
      }
    }
    book.apply_draft(draft, genre);
    self.store.update_book(&book).await?;
    Ok(book)
  }

  #[instrument(name = "CatalogService::delete_book", skip(self), err(Display))]
  pub async fn delete_book(&self, actor_id: Uuid, book_id: Uuid) -> Result<()> {
    self.ensure_admin(actor_id).await?;
    if !self.store.delete_book(book_id).await? {
      return Err(BookstoreError::not_found("Book not found"));
    }
    info!("Book removed from catalog.");
    Ok(())
  }
}
