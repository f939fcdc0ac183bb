// bookstore_server/src/services/account_service.rs

//! Registration, login and profile management.

use crate::errors::{AppError, Result};
use crate::services::auth_service::{hash_password, verify_password};
use crate::services::session_service::SessionStore;
use bookstore::models::{NewUser, ProfileUpdate, Role, User};
use bookstore::validation::{validate_password_change, validate_profile, validate_registration};
use bookstore::{BookstoreError, Store, UserRepository};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const BAD_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AccountService {
  store: Arc<dyn Store>,
  sessions: Arc<SessionStore>,
}

impl AccountService {
  pub fn new(store: Arc<dyn Store>, sessions: Arc<SessionStore>) -> Self {
    Self { store, sessions }
  }

  pub fn sessions(&self) -> &Arc<SessionStore> {
    &self.sessions
  }

  async fn ensure_identity_free(&self, email: &str, username: &str, owner: Option<Uuid>) -> Result<()> {
    let taken_by_other = |user: Option<User>| user.is_some_and(|u| Some(u.id) != owner);
    if taken_by_other(self.store.find_user_by_email(email).await?) {
      return Err(AppError::AlreadyExists("Email is already in use".to_string()));
    }
    if taken_by_other(self.store.find_user_by_username(username).await?) {
      return Err(AppError::AlreadyExists("Username is already taken".to_string()));
    }
    Ok(())
  }

  #[instrument(name = "AccountService::register", skip(self, new_user), fields(username = %new_user.username), err(Display))]
  pub async fn register(&self, new_user: NewUser) -> Result<User> {
    self.create_user(new_user, Role::User).await
  }

  /// Creates an account with the given role. Used by registration and by the
  /// startup admin seed.
  pub async fn create_user(&self, new_user: NewUser, role: Role) -> Result<User> {
    validate_registration(&new_user)?;
    let email = new_user.email.trim().to_lowercase();
    let username = new_user.username.trim().to_string();
    self.ensure_identity_free(&email, &username, None).await?;

    let now = Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      first_name: new_user.first_name.trim().to_string(),
      last_name: new_user.last_name.trim().to_string(),
      username,
      email,
      password_hash: hash_password(&new_user.password)?,
      address: new_user.address,
      role,
      is_active: true,
      created_at: now,
      updated_at: now,
    };
    self.store.insert_user(&user).await?;
    info!(user_id = %user.id, role = user.role.as_str(), "User registered.");
    Ok(user)
  }

  /// Checks credentials and opens a session. Returns the token and the user.
  #[instrument(name = "AccountService::login", skip(self, email, password), err(Display))]
  pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
    let email = email.trim().to_lowercase();
    let user = match self.store.find_user_by_email(&email).await? {
      Some(user) => user,
      None => {
        warn!("Login attempt for unknown email.");
        return Err(AppError::Auth(BAD_CREDENTIALS.to_string()));
      }
    };
    if !user.is_active {
      return Err(AppError::Auth("Account is disabled".to_string()));
    }
    if !verify_password(&user.password_hash, password)? {
      warn!(user_id = %user.id, "Login attempt with wrong password.");
      return Err(AppError::Auth(BAD_CREDENTIALS.to_string()));
    }
    let token = self.sessions.issue(user.id);
    info!(user_id = %user.id, "User logged in.");
    Ok((token, user))
  }

  pub fn logout(&self, token: &str) {
    self.sessions.revoke(token);
  }

  pub async fn get_profile(&self, user_id: Uuid) -> Result<User> {
    self
      .store
      .find_user(user_id)
      .await?
      .ok_or_else(|| AppError::NotFound("User not found".to_string()))
  }

  #[instrument(name = "AccountService::update_profile", skip(self, update), err(Display))]
  pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> Result<User> {
    validate_profile(&update)?;
    let mut user = self.get_profile(user_id).await?;
    let email = update.email.trim().to_lowercase();
    let username = update.username.trim().to_string();
    self.ensure_identity_free(&email, &username, Some(user_id)).await?;

    user.first_name = update.first_name.trim().to_string();
    user.last_name = update.last_name.trim().to_string();
    user.email = email;
    user.username = username;
    user.address = update.address;
    user.updated_at = Utc::now();
    self.store.update_user(&user).await?;
    Ok(user)
  }

  /// Removes the account and ends all of its sessions.
  #[instrument(name = "AccountService::delete_account", skip(self), err(Display))]
  pub async fn delete_account(&self, user_id: Uuid) -> Result<()> {
    if !self.store.delete_user(user_id).await? {
      return Err(BookstoreError::not_found("User not found").into());
    }
    self.sessions.revoke_user(user_id);
    info!("Account deleted.");
    Ok(())
  }

  #[instrument(name = "AccountService::change_password", skip(self, current, new_password), err(Display))]
  pub async fn change_password(&self, user_id: Uuid, current: &str, new_password: &str) -> Result<()> {
    validate_password_change(current, new_password)?;
    let mut user = self.get_profile(user_id).await?;
    if !verify_password(&user.password_hash, current)? {
      return Err(AppError::Validation("Current password is incorrect".to_string()));
    }
    user.password_hash = hash_password(new_password)?;
    user.updated_at = Utc::now();
    self.store.update_user(&user).await?;
    Ok(())
  }
}
