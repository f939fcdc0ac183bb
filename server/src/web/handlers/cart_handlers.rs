// bookstore_server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTO ---
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CartLinePayload {
  pub book_id: Uuid,
  pub quantity: i32,
}

#[instrument(name = "handler::view_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.bookstore.carts.view(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, book_id = %req_payload.book_id, quantity = %req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CartLinePayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let line = app_state
    .bookstore
    .carts
    .add_line(auth_user.user_id, req_payload.book_id, req_payload.quantity)
    .await?;
  info!(new_quantity = line.quantity, "Book added to cart.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Book added to cart successfully.",
      "cartLine": line,
  })))
}

#[instrument(
    name = "handler::update_cart_line",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, book_id = %req_payload.book_id, quantity = %req_payload.quantity)
)]
pub async fn update_cart_line_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CartLinePayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let line = app_state
    .bookstore
    .carts
    .update_line(auth_user.user_id, req_payload.book_id, req_payload.quantity)
    .await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Cart updated successfully.",
      "cartLine": line,
  })))
}

#[instrument(name = "handler::remove_cart_line", skip(app_state, auth_user), fields(user_id = %auth_user.user_id, book_id = %path))]
pub async fn remove_cart_line_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .bookstore
    .carts
    .remove_line(auth_user.user_id, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Book removed from cart." })))
}

#[instrument(name = "handler::clear_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  app_state.bookstore.carts.clear(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Cart cleared." })))
}
