// bookstore_server/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod book_handlers;
pub mod cart_handlers;
pub mod favorite_handlers;
pub mod order_handlers;
pub mod review_handlers;
pub mod user_handlers;
