// bookstore_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` runs the server on the in-memory store.
  pub database_url: Option<String>,
  pub database_max_connections: u32,

  /// From address of outgoing mail.
  pub mail_sender: String,

  pub session_ttl_secs: u64,

  // Startup seeding
  pub seed_db: bool,
  pub seed_admin_email: Option<String>,
  pub seed_admin_password: Option<String>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      database_max_connections: 5,
      mail_sender: "noreply@bookstore.local".to_string(),
      session_ttl_secs: 3600,
      seed_db: false,
      seed_admin_email: None,
      seed_admin_password: None,
    }
  }
}

fn optional_env(var_name: &str) -> Option<String> {
  env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_env<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match optional_env(var_name) {
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))),
    None => Ok(default),
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let defaults = Self::default();

    let config = Self {
      server_host: optional_env("SERVER_HOST").unwrap_or(defaults.server_host),
      server_port: parsed_env("SERVER_PORT", defaults.server_port)?,
      database_url: optional_env("DATABASE_URL"),
      database_max_connections: parsed_env("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?,
      mail_sender: optional_env("MAIL_SENDER").unwrap_or(defaults.mail_sender),
      session_ttl_secs: parsed_env("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
      seed_db: parsed_env("SEED_DB", defaults.seed_db)?,
      seed_admin_email: optional_env("SEED_ADMIN_EMAIL"),
      seed_admin_password: optional_env("SEED_ADMIN_PASSWORD"),
    };

    if config.database_max_connections == 0 {
      return Err(AppError::Config("DATABASE_MAX_CONNECTIONS must be at least 1".to_string()));
    }

    tracing::info!(
      host = %config.server_host,
      port = config.server_port,
      persistent = config.database_url.is_some(),
      "Application configuration loaded."
    );
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
