// bookstore_server/src/services/session_service.rs

//! Bearer session tokens issued at login and kept in process memory.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rand_core::{OsRng, RngCore};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
struct Session {
  user_id: Uuid,
  expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionStore {
  ttl: Duration,
  sessions: RwLock<HashMap<String, Session>>,
}

fn new_token() -> String {
  let mut bytes = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

impl SessionStore {
  pub fn new(ttl_secs: u64) -> Self {
    let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
    Self {
      ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
      sessions: RwLock::new(HashMap::new()),
    }
  }

  /// Starts a session for `user_id` and returns its token. Expired sessions
  /// are swept out first.
  pub fn issue(&self, user_id: Uuid) -> String {
    let token = new_token();
    let now = Utc::now();
    let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, s| s.expires_at > now);
    let purged = before - sessions.len();
    sessions.insert(token.clone(), Session { user_id, expires_at });
    drop(sessions);
    debug!(%user_id, purged, "Session issued.");
    token
  }

  /// The user behind a live token. Expired tokens are dropped on sight.
  pub fn resolve(&self, token: &str) -> Option<Uuid> {
    let session = self.sessions.read().get(token).cloned()?;
    if session.expires_at <= Utc::now() {
      self.sessions.write().remove(token);
      debug!(user_id = %session.user_id, "Session expired.");
      return None;
    }
    Some(session.user_id)
  }

  pub fn revoke(&self, token: &str) -> bool {
    self.sessions.write().remove(token).is_some()
  }

  /// Ends every session of a user.
  pub fn revoke_user(&self, user_id: Uuid) {
    self.sessions.write().retain(|_, s| s.user_id != user_id);
  }
}
