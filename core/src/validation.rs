// bookstore/src/validation.rs

//! Input rules shared by the services. Each check collects every violation
//! and reports them together in one `Validation` error.

use crate::error::BookstoreError;
use crate::models::{Address, BookDraft, Genre, NewUser, ProfileUpdate};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Option<Regex>> =
  Lazy::new(|| Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").ok());

const PASSWORD_SPECIALS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
  fn require(&mut self, ok: bool, message: &str) {
    if !ok {
      self.0.push(message.to_string());
    }
  }

  fn finish(self) -> Result<(), BookstoreError> {
    if self.0.is_empty() {
      Ok(())
    } else {
      Err(BookstoreError::Validation(self.0.join("; ")))
    }
  }
}

fn not_blank(s: &str) -> bool {
  !s.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
  match EMAIL_RE.as_ref() {
    Some(re) => re.is_match(email.trim()),
    None => false,
  }
}

fn check_password(v: &mut Violations, field: &str, password: &str) {
  v.require(
    password.chars().count() >= MIN_PASSWORD_LEN,
    &format!("{} must be at least {} characters long", field, MIN_PASSWORD_LEN),
  );
  v.require(
    password.chars().any(|c| c.is_ascii_lowercase()),
    &format!("{} must include one lowercase letter", field),
  );
  v.require(
    password.chars().any(|c| c.is_ascii_uppercase()),
    &format!("{} must include one uppercase letter", field),
  );
  v.require(
    password.chars().any(|c| c.is_ascii_digit()),
    &format!("{} must include one number", field),
  );
  v.require(
    password.chars().any(|c| PASSWORD_SPECIALS.contains(&c)),
    &format!("{} must include one special character", field),
  );
}

fn check_identity(v: &mut Violations, first_name: &str, last_name: &str, username: &str, email: &str) {
  v.require(not_blank(first_name), "First name is required");
  v.require(not_blank(last_name), "Last name is required");
  v.require(
    username.trim().chars().count() >= MIN_USERNAME_LEN,
    "Username must be at least 3 characters",
  );
  v.require(is_valid_email(email), "Valid email is required");
}

fn check_address(v: &mut Violations, address: &Address) {
  v.require(not_blank(&address.city), "City is required");
  v.require(not_blank(&address.street), "Street is required");
  v.require(not_blank(&address.house_number), "House number is required");
  v.require(not_blank(&address.postal_code), "Postal code is required");
  v.require(not_blank(&address.country), "Country is required");
}

pub fn validate_registration(new_user: &NewUser) -> Result<(), BookstoreError> {
  let mut v = Violations::default();
  check_identity(
    &mut v,
    &new_user.first_name,
    &new_user.last_name,
    &new_user.username,
    &new_user.email,
  );
  check_password(&mut v, "Password", &new_user.password);
  check_address(&mut v, &new_user.address);
  v.finish()
}

pub fn validate_profile(update: &ProfileUpdate) -> Result<(), BookstoreError> {
  let mut v = Violations::default();
  check_identity(&mut v, &update.first_name, &update.last_name, &update.username, &update.email);
  check_address(&mut v, &update.address);
  v.finish()
}

pub fn validate_password_change(current: &str, new_password: &str) -> Result<(), BookstoreError> {
  let mut v = Violations::default();
  v.require(!current.is_empty(), "Current password is required");
  check_password(&mut v, "New password", new_password);
  v.finish()
}

/// Validates a book draft and resolves its genre.
pub fn validate_book(draft: &BookDraft) -> Result<Genre, BookstoreError> {
  let mut v = Violations::default();
  v.require(not_blank(&draft.title), "Title is required");
  v.require(not_blank(&draft.author), "Author is required");
  v.require(not_blank(&draft.description), "Description is required");
  v.require(not_blank(&draft.isbn), "ISBN is required");
  v.require(draft.quantity >= 0, "Quantity must be a positive integer");
  v.require(draft.price_cents >= 0, "Price must be a positive number");
  let genre = if not_blank(&draft.genre) {
    let parsed = draft.genre.parse::<Genre>().ok();
    v.require(parsed.is_some(), "Invalid genre");
    parsed
  } else {
    v.require(false, "Genre is required");
    None
  };
  v.finish()?;
  genre.ok_or_else(|| BookstoreError::Validation("Invalid genre".to_string()))
}

pub fn validate_review(rating: i32, review_text: &str) -> Result<(), BookstoreError> {
  let mut v = Violations::default();
  v.require(
    (MIN_RATING..=MAX_RATING).contains(&rating),
    "Rating must be between 1 and 5",
  );
  v.require(not_blank(review_text), "Review text is required");
  v.finish()
}

pub fn validate_quantity(quantity: i32) -> Result<(), BookstoreError> {
  if quantity < 1 {
    return Err(BookstoreError::Validation(
      "Quantity must be a positive number.".to_string(),
    ));
  }
  Ok(())
}
