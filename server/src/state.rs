// bookstore_server/src/state.rs

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{AccountService, SessionStore};
use bookstore::{Bookstore, Notifier, Store};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub bookstore: Bookstore,
  pub accounts: AccountService,
  pub sessions: Arc<SessionStore>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires the domain services and account handling over one store.
  pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>, config: Arc<AppConfig>) -> Result<Self> {
    let sessions = Arc::new(SessionStore::new(config.session_ttl_secs));
    let bookstore = Bookstore::new(store.clone(), notifier)?;
    let accounts = AccountService::new(store, sessions.clone());
    Ok(Self {
      bookstore,
      accounts,
      sessions,
      config,
    })
  }
}
