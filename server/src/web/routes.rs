// bookstore_server/src/web/routes.rs

use actix_web::{error, web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{
  auth_handlers, book_handlers, cart_handlers, favorite_handlers, order_handlers, review_handlers, user_handlers,
};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed bodies and path ids are client errors and use the same
/// `{"error": ...}` shape as every other failure.
fn json_error_handler(err: error::JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid request body: {}", err)).into()
}

fn path_error_handler(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid path parameter: {}", err)).into()
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/auth")
            .route("/register", web::post().to(auth_handlers::register_handler))
            .route("/login", web::post().to(auth_handlers::login_handler))
            .route("/logout", web::post().to(auth_handlers::logout_handler)),
        )
        .service(
          web::scope("/user")
            .route("/change-password", web::put().to(user_handlers::change_password_handler))
            .route("", web::get().to(user_handlers::get_profile_handler))
            .route("", web::put().to(user_handlers::update_profile_handler))
            .route("", web::delete().to(user_handlers::delete_account_handler)),
        )
        .service(
          web::scope("/books")
            .route("", web::get().to(book_handlers::list_books_handler))
            .route("", web::post().to(book_handlers::add_book_handler))
            .route("/{id}", web::get().to(book_handlers::get_book_handler))
            .route("/{id}", web::put().to(book_handlers::update_book_handler))
            .route("/{id}", web::delete().to(book_handlers::delete_book_handler)),
        )
        .service(
          web::scope("/cart")
            .route("", web::get().to(cart_handlers::view_cart_handler))
            .route("/add", web::post().to(cart_handlers::add_to_cart_handler))
            .route("/update", web::put().to(cart_handlers::update_cart_line_handler))
            .route("/remove/{bookId}", web::delete().to(cart_handlers::remove_cart_line_handler))
            .route("/clear", web::delete().to(cart_handlers::clear_cart_handler)),
        )
        .service(
          web::scope("/order")
            .route("/place", web::post().to(order_handlers::place_order_handler))
            .route("/user", web::get().to(order_handlers::list_orders_handler))
            .route("/{orderId}", web::get().to(order_handlers::get_order_handler)),
        )
        .service(
          web::scope("/reviews")
            .route("", web::post().to(review_handlers::add_review_handler))
            .route("/{bookId}", web::get().to(review_handlers::reviews_for_book_handler))
            .route("/{reviewId}", web::put().to(review_handlers::update_review_handler))
            .route("/{reviewId}", web::delete().to(review_handlers::delete_review_handler)),
        )
        .service(
          web::scope("/favorites")
            .route("", web::post().to(favorite_handlers::add_favorite_handler))
            .route("", web::get().to(favorite_handlers::list_favorites_handler))
            .route("/{favoriteId}", web::delete().to(favorite_handlers::remove_favorite_handler)),
        ),
    );
}
