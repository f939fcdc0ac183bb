// bookstore/src/models/book.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Closed list of catalog genres. Serialized with their display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
  #[serde(rename = "Fiction")]
  Fiction,
  #[serde(rename = "Non-Fiction")]
  NonFiction,
  #[serde(rename = "Fantasy")]
  Fantasy,
  #[serde(rename = "Science Fiction")]
  ScienceFiction,
  #[serde(rename = "Mystery")]
  Mystery,
  #[serde(rename = "Thriller")]
  Thriller,
  #[serde(rename = "Romance")]
  Romance,
  #[serde(rename = "Historical Fiction")]
  HistoricalFiction,
  #[serde(rename = "Biography")]
  Biography,
  #[serde(rename = "Autobiography")]
  Autobiography,
  #[serde(rename = "Self-Help")]
  SelfHelp,
  #[serde(rename = "Philosophy")]
  Philosophy,
  #[serde(rename = "Travel")]
  Travel,
  #[serde(rename = "Cookbooks")]
  Cookbooks,
  #[serde(rename = "Poetry")]
  Poetry,
  #[serde(rename = "Drama")]
  Drama,
  #[serde(rename = "Children")]
  Children,
  #[serde(rename = "Young Adult")]
  YoungAdult,
}

impl Genre {
  pub const ALL: [Genre; 18] = [
    Genre::Fiction,
    Genre::NonFiction,
    Genre::Fantasy,
    Genre::ScienceFiction,
    Genre::Mystery,
    Genre::Thriller,
    Genre::Romance,
    Genre::HistoricalFiction,
    Genre::Biography,
    Genre::Autobiography,
    Genre::SelfHelp,
    Genre::Philosophy,
    Genre::Travel,
    Genre::Cookbooks,
    Genre::Poetry,
    Genre::Drama,
    Genre::Children,
    Genre::YoungAdult,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Genre::Fiction => "Fiction",
      Genre::NonFiction => "Non-Fiction",
      Genre::Fantasy => "Fantasy",
      Genre::ScienceFiction => "Science Fiction",
      Genre::Mystery => "Mystery",
      Genre::Thriller => "Thriller",
      Genre::Romance => "Romance",
      Genre::HistoricalFiction => "Historical Fiction",
      Genre::Biography => "Biography",
      Genre::Autobiography => "Autobiography",
      Genre::SelfHelp => "Self-Help",
      Genre::Philosophy => "Philosophy",
      Genre::Travel => "Travel",
      Genre::Cookbooks => "Cookbooks",
      Genre::Poetry => "Poetry",
      Genre::Drama => "Drama",
      Genre::Children => "Children",
      Genre::YoungAdult => "Young Adult",
    }
  }
}

impl fmt::Display for Genre {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGenre(pub String);

impl fmt::Display for UnknownGenre {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown genre '{}'", self.0)
  }
}

impl std::error::Error for UnknownGenre {}

impl FromStr for Genre {
  type Err = UnknownGenre;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Genre::ALL
      .iter()
      .copied()
      .find(|g| g.as_str() == s.trim())
      .ok_or_else(|| UnknownGenre(s.to_string()))
  }
}

/// A catalog entry. `quantity` is the stock on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
  pub id: Uuid,
  pub title: String,
  pub author: String,
  pub description: String,
  pub genre: Genre,
  pub quantity: i32,
  pub price_cents: i64,
  pub publisher_date: NaiveDate,
  pub isbn: String,
  pub cover_image: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields for creating or replacing a book.
///
/// `genre` stays a plain string so an unknown value is reported as a
/// validation error rather than a body parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
  pub title: String,
  pub author: String,
  #[serde(default)]
  pub description: String,
  pub genre: String,
  pub quantity: i32,
  pub price_cents: i64,
  pub publisher_date: NaiveDate,
  pub isbn: String,
  #[serde(default)]
  pub cover_image: String,
}

impl Book {
  /// Builds a new catalog entry from an already validated draft.
  pub fn from_draft(draft: BookDraft, genre: Genre) -> Self {
    let now = Utc::now();
    Book {
      id: Uuid::new_v4(),
      title: draft.title.trim().to_string(),
      author: draft.author.trim().to_string(),
      description: draft.description,
      genre,
      quantity: draft.quantity,
      price_cents: draft.price_cents,
      publisher_date: draft.publisher_date,
      isbn: draft.isbn.trim().to_string(),
      cover_image: draft.cover_image.trim().to_string(),
      created_at: now,
      updated_at: now,
    }
  }

  /// Overwrites the editable fields with a validated draft.
  pub fn apply_draft(&mut self, draft: BookDraft, genre: Genre) {
    self.title = draft.title.trim().to_string();
    self.author = draft.author.trim().to_string();
    self.description = draft.description;
    self.genre = genre;
    self.quantity = draft.quantity;
    self.price_cents = draft.price_cents;
    self.publisher_date = draft.publisher_date;
    self.isbn = draft.isbn.trim().to_string();
    if !draft.cover_image.trim().is_empty() {
      self.cover_image = draft.cover_image.trim().to_string();
    }
    self.updated_at = Utc::now();
  }
}
