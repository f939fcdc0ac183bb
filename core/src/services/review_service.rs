// bookstore/src/services/review_service.rs

use crate::error::{BookstoreError, Result};
use crate::models::{Review, ReviewDraft, ReviewEdit, ReviewView};
use crate::store::{BookRepository, ReviewRepository, Store, UserRepository};
use crate::validation::validate_review;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReviewService {
  store: Arc<dyn Store>,
}

impl ReviewService {
  pub fn new(store: Arc<dyn Store>) -> Self {
    Self { store }
  }

  #[instrument(name = "ReviewService::add_review", skip(self, draft), fields(book_id = %draft.book_id), err(Display))]
  pub async fn add_review(&self, user_id: Uuid, draft: ReviewDraft) -> Result<Review> {
    validate_review(draft.rating, &draft.review_text)?;
    if self.store.find_book(draft.book_id).await?.is_none() {
      return Err(BookstoreError::not_found("Book not found"));
    }
    let now = Utc::now();
    let review = Review {
      id: Uuid::new_v4(),
      book_id: draft.book_id,
      user_id,
      rating: draft.rating,
      review_text: draft.review_text.trim().to_string(),
      created_at: now,
      updated_at: now,
    };
    self.store.insert_review(&review).await?;
    Ok(review)
  }

  /// Reviews of a book, newest first, each with its author's username.
  pub async fn reviews_for_book(&self, book_id: Uuid) -> Result<Vec<ReviewView>> {
    let reviews = self.store.list_reviews_for_book(book_id).await?;
    let mut usernames: HashMap<Uuid, Option<String>> = HashMap::new();
    let mut views = Vec::with_capacity(reviews.len());
    for review in reviews {
      let username = match usernames.get(&review.user_id) {
        Some(name) => name.clone(),
        None => {
          let name = self.store.find_user(review.user_id).await?.map(|u| u.username);
          usernames.insert(review.user_id, name.clone());
          name
        }
      };
      views.push(ReviewView { review, username });
    }
    Ok(views)
  }

  async fn own_review(&self, user_id: Uuid, review_id: Uuid) -> Result<Review> {
    self
      .store
      .find_review(review_id)
      .await?
      .filter(|r| r.user_id == user_id)
      .ok_or_else(|| BookstoreError::not_found("Review not found or unauthorized"))
  }

  #[instrument(name = "ReviewService::update_review", skip(self, edit), err(Display))]
  pub async fn update_review(&self, user_id: Uuid, review_id: Uuid, edit: ReviewEdit) -> Result<Review> {
    validate_review(edit.rating, &edit.review_text)?;
    let mut review = self.own_review(user_id, review_id).await?;
    review.rating = edit.rating;
    review.review_text = edit.review_text.trim().to_string();
    review.updated_at = Utc::now();
    self.store.update_review(&review).await?;
    Ok(review)
  }

  #[instrument(name = "ReviewService::delete_review", skip(self), err(Display))]
  pub async fn delete_review(&self, user_id: Uuid, review_id: Uuid) -> Result<()> {
    let review = self.own_review(user_id, review_id).await?;
    self.store.delete_review(review.id).await?;
    Ok(())
  }
}
