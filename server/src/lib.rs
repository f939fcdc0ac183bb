// bookstore_server/src/lib.rs

//! HTTP API of the bookstore: actix-web handlers over the `bookstore` core,
//! with PostgreSQL persistence, password accounts and bearer sessions.

pub mod config;
pub mod db;
pub mod errors;
pub mod services;
pub mod state;
pub mod web;

pub use config::AppConfig;
pub use errors::AppError;
pub use state::AppState;
