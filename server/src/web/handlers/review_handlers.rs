// bookstore_server/src/web/handlers/review_handlers.rs

use actix_web::{web, HttpResponse};
use bookstore::models::{ReviewDraft, ReviewEdit};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::add_review", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id, book_id = %req_payload.book_id))]
pub async fn add_review_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<ReviewDraft>,
) -> Result<HttpResponse, AppError> {
  let review = app_state
    .bookstore
    .reviews
    .add_review(auth_user.user_id, req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Created().json(review))
}

#[instrument(name = "handler::reviews_for_book", skip(app_state), fields(book_id = %path))]
pub async fn reviews_for_book_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let reviews = app_state.bookstore.reviews.reviews_for_book(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(reviews))
}

#[instrument(name = "handler::update_review", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id, review_id = %path))]
pub async fn update_review_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
  req_payload: web::Json<ReviewEdit>,
) -> Result<HttpResponse, AppError> {
  let review = app_state
    .bookstore
    .reviews
    .update_review(auth_user.user_id, path.into_inner(), req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(review))
}

#[instrument(name = "handler::delete_review", skip(app_state, auth_user), fields(user_id = %auth_user.user_id, review_id = %path))]
pub async fn delete_review_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .bookstore
    .reviews
    .delete_review(auth_user.user_id, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Review deleted successfully." })))
}
