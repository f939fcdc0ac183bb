// bookstore_server/src/web/handlers/favorite_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePayload {
  pub book_id: Uuid,
}

#[instrument(name = "handler::add_favorite", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id, book_id = %req_payload.book_id))]
pub async fn add_favorite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<FavoritePayload>,
) -> Result<HttpResponse, AppError> {
  let favorite = app_state
    .bookstore
    .favorites
    .add_favorite(auth_user.user_id, req_payload.book_id)
    .await?;
  Ok(HttpResponse::Created().json(favorite))
}

#[instrument(name = "handler::list_favorites", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_favorites_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let favorites = app_state.bookstore.favorites.list_favorites(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(favorites))
}

#[instrument(name = "handler::remove_favorite", skip(app_state, auth_user), fields(user_id = %auth_user.user_id, favorite_id = %path))]
pub async fn remove_favorite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .bookstore
    .favorites
    .remove_favorite(auth_user.user_id, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Favorite removed." })))
}
