// bookstore/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Admin,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::User => "user",
      Role::Admin => "admin",
    }
  }

  pub fn parse(s: &str) -> Option<Role> {
    match s {
      "user" => Some(Role::User),
      "admin" => Some(Role::Admin),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  pub city: String,
  pub street: String,
  pub house_number: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub apartment_number: Option<String>,
  pub postal_code: String,
  pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub username: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub address: Address,
  pub role: Role,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn is_admin(&self) -> bool {
    self.role == Role::Admin
  }
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub first_name: String,
  pub last_name: String,
  pub username: String,
  pub email: String,
  pub password: String,
  pub address: Address,
}

/// Profile edit payload; the password is changed through its own operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
  pub first_name: String,
  pub last_name: String,
  pub username: String,
  pub email: String,
  pub address: Address,
}
