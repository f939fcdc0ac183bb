// bookstore_server/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use bookstore::models::ProfileUpdate;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
  pub current_password: String,
  pub new_password: String,
}

#[instrument(name = "handler::get_profile", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = app_state.accounts.get_profile(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(user))
}

#[instrument(name = "handler::update_profile", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id))]
pub async fn update_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
  let user = app_state
    .accounts
    .update_profile(auth_user.user_id, req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Profile updated successfully.",
      "user": user,
  })))
}

#[instrument(name = "handler::delete_account", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_account_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  app_state.accounts.delete_account(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Account deleted successfully." })))
}

#[instrument(name = "handler::change_password", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id))]
pub async fn change_password_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<ChangePasswordPayload>,
) -> Result<HttpResponse, AppError> {
  app_state
    .accounts
    .change_password(auth_user.user_id, &req_payload.current_password, &req_payload.new_password)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Password changed successfully." })))
}
