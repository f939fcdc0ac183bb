// bookstore_server/src/services/mod.rs

pub mod account_service;
pub mod auth_service;
pub mod mailer;
pub mod seed;
pub mod session_service;

pub use account_service::AccountService;
pub use mailer::MockMailer;
pub use session_service::SessionStore;
