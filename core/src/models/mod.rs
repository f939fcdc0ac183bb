// bookstore/src/models/mod.rs

//! Domain entities and the read models returned to clients.
//!
//! Money is always carried as integer cents (`i64`).

pub mod book;
pub mod cart;
pub mod favorite;
pub mod order;
pub mod review;
pub mod user;

pub use book::{Book, BookDraft, Genre};
pub use cart::{Cart, CartLine, CartLineView, CartView};
pub use favorite::{Favorite, FavoriteView};
pub use order::{Order, OrderLine, OrderLineView, OrderView};
pub use review::{Review, ReviewDraft, ReviewEdit, ReviewView};
pub use user::{Address, NewUser, ProfileUpdate, Role, User};

/// Renders cents as a decimal amount, e.g. `2550` as `"25.50"`.
pub fn format_cents(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let abs = cents.unsigned_abs();
  format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
