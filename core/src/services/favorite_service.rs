// bookstore/src/services/favorite_service.rs

use crate::error::{BookstoreError, Result};
use crate::models::{Favorite, FavoriteView};
use crate::store::{books_by_id, BookRepository, FavoriteRepository, Store};
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct FavoriteService {
  store: Arc<dyn Store>,
}

impl FavoriteService {
  pub fn new(store: Arc<dyn Store>) -> Self {
    Self { store }
  }

  #[instrument(name = "FavoriteService::add_favorite", skip(self), err(Display))]
  pub async fn add_favorite(&self, user_id: Uuid, book_id: Uuid) -> Result<Favorite> {
    if self.store.find_book(book_id).await?.is_none() {
      return Err(BookstoreError::not_found("Book not found"));
    }
    if self.store.find_favorite_for(user_id, book_id).await?.is_some() {
      return Err(BookstoreError::AlreadyExists("Book is already in favorites".to_string()));
    }
    let favorite = Favorite {
      id: Uuid::new_v4(),
      user_id,
      book_id,
      created_at: Utc::now(),
    };
    self.store.insert_favorite(&favorite).await?;
    Ok(favorite)
  }

  /// Favorites joined with their books. Entries whose book is gone are left out.
  pub async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<FavoriteView>> {
    let favorites = self.store.list_favorites_for_user(user_id).await?;
    let ids: Vec<Uuid> = favorites.iter().map(|f| f.book_id).collect();
    let mut books = books_by_id(&*self.store, &ids).await?;
    Ok(
      favorites
        .into_iter()
        .filter_map(|f| {
          books.remove(&f.book_id).map(|book| FavoriteView {
            id: f.id,
            book,
            created_at: f.created_at,
          })
        })
        .collect(),
    )
  }

  #[instrument(name = "FavoriteService::remove_favorite", skip(self), err(Display))]
  pub async fn remove_favorite(&self, user_id: Uuid, favorite_id: Uuid) -> Result<()> {
    let owned = self
      .store
      .find_favorite(favorite_id)
      .await?
      .is_some_and(|f| f.user_id == user_id);
    if !owned || !self.store.delete_favorite(favorite_id).await? {
      return Err(BookstoreError::not_found("Favorite not found"));
    }
    Ok(())
  }
}
