// bookstore/src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  pub id: Uuid,
  pub book_id: Uuid,
  pub user_id: Uuid,
  pub rating: i32,
  pub review_text: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
  pub book_id: Uuid,
  pub rating: i32,
  pub review_text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEdit {
  pub rating: i32,
  pub review_text: String,
}

/// A review with the author's public name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
  #[serde(flatten)]
  pub review: Review,
  pub username: Option<String>,
}
