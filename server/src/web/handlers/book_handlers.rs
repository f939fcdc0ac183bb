// bookstore_server/src/web/handlers/book_handlers.rs

use actix_web::{web, HttpResponse};
use bookstore::models::BookDraft;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_books", skip(app_state))]
pub async fn list_books_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let books = app_state.bookstore.catalog.list_books().await?;
  Ok(HttpResponse::Ok().json(books))
}

#[instrument(name = "handler::get_book", skip(app_state), fields(book_id = %path))]
pub async fn get_book_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let book = app_state.bookstore.catalog.get_book(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(book))
}

#[instrument(name = "handler::add_book", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id))]
pub async fn add_book_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<BookDraft>,
) -> Result<HttpResponse, AppError> {
  let book = app_state
    .bookstore
    .catalog
    .add_book(auth_user.user_id, req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Created().json(book))
}

#[instrument(name = "handler::update_book", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id, book_id = %path))]
pub async fn update_book_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
  req_payload: web::Json<BookDraft>,
) -> Result<HttpResponse, AppError> {
  let book = app_state
    .bookstore
    .catalog
    .update_book(auth_user.user_id, path.into_inner(), req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(book))
}

#[instrument(name = "handler::delete_book", skip(app_state, auth_user), fields(user_id = %auth_user.user_id, book_id = %path))]
pub async fn delete_book_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state
    .bookstore
    .catalog
    .delete_book(auth_user.user_id, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Book deleted successfully." })))
}
