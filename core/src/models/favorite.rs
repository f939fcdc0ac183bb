// bookstore/src/models/favorite.rs

use super::book::Book;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
  pub id: Uuid,
  pub user_id: Uuid,
  pub book_id: Uuid,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteView {
  pub id: Uuid,
  pub book: Book,
  pub created_at: DateTime<Utc>,
}
