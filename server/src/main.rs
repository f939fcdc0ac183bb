// bookstore_server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use bookstore::{MemoryStore, Store};
use bookstore_server::config::AppConfig;
use bookstore_server::db::{self, PgStore};
use bookstore_server::errors::AppError;
use bookstore_server::services::{seed, MockMailer};
use bookstore_server::state::AppState;
use bookstore_server::web::configure_app_routes;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

async fn build_state(config: Arc<AppConfig>) -> Result<AppState, AppError> {
  let store: Arc<dyn Store> = match &config.database_url {
    Some(url) => Arc::new(PgStore::new(db::connect(url, &config).await?)),
    None => {
      tracing::warn!("DATABASE_URL is not set; using the in-memory store. Data is lost on shutdown.");
      Arc::new(MemoryStore::new())
    }
  };
  let mailer = Arc::new(MockMailer::new(config.mail_sender.clone()));
  let state = AppState::new(store.clone(), mailer, config.clone())?;
  seed::run(&config, &state.accounts, &*store).await?;
  Ok(state)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
    tracing_subscriber::fmt()
      .json()
      .with_env_filter(filter)
      .with_span_events(FmtSpan::CLOSE)
      .init();
  } else {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
      .init();
  }

  tracing::info!("Starting bookstore API server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let app_state = match build_state(app_config.clone()).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize application state.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
