// bookstore_server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use bookstore::models::NewUser;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub email: String,
  pub password: String,
}

#[instrument(
    name = "handler::register",
    skip(app_state, req_payload),
    fields(username = %req_payload.username)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
  let user = app_state.accounts.register(req_payload.into_inner()).await?;
  info!(user_id = %user.id, "Registration completed.");
  Ok(HttpResponse::Created().json(json!({
      "message": "User registered successfully.",
      "user": user,
  })))
}

#[instrument(name = "handler::login", skip(app_state, req_payload))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let LoginRequestPayload { email, password } = req_payload.into_inner();
  let (token, user) = app_state.accounts.login(&email, &password).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Login successful.",
      "token": token,
      "user": user,
  })))
}

#[instrument(name = "handler::logout", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn logout_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  app_state.accounts.logout(&auth_user.token);
  info!("Session ended.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Logged out successfully." })))
}
