// tests/shop_api_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use bookstore::models::Role;
use bookstore::{BookRepository, CartRepository};
use bookstore_server::web::configure_app_routes;
use common::*;
use serde_json::{json, Value};
use serial_test::serial;
use uuid::Uuid;

#[actix_web::test]
#[serial]
async fn test_catalog_writes_require_admin() {
  setup_tracing();
  let t = test_app();
  let app = test::init_service(App::new().app_data(web::Data::new(t.state.clone())).configure(configure_app_routes)).await;
  let (_, admin_token) = signed_in(&t, "boss", Role::Admin).await;
  let (_, user_token) = signed_in(&t, "reader", Role::User).await;

  let req = test::TestRequest::post().uri("/api/books").set_json(book_json("Dune", "111", 1899)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::post()
    .uri("/api/books")
    .insert_header(bearer(&user_token))
    .set_json(book_json("Dune", "111", 1899))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

  let req = test::TestRequest::post()
    .uri("/api/books")
    .insert_header(bearer(&admin_token))
    .set_json(book_json("Dune", "111", 1899))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created: Value = test::read_body_json(resp).await;
  let book_id = created["id"].as_str().unwrap().to_string();
  assert_eq!(created["genre"], "Fiction");
  assert_eq!(created["priceCents"], 1899);

  // Duplicate ISBN
  let req = test::TestRequest::post()
    .uri("/api/books")
    .insert_header(bearer(&admin_token))
    .set_json(book_json("Dune Again", "111", 1899))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let mut bad_genre = book_json("Neuromancer", "222", 1500);
  bad_genre["genre"] = json!("Cyberpunk");
  let req = test::TestRequest::post()
    .uri("/api/books")
    .insert_header(bearer(&admin_token))
    .set_json(bad_genre)
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::put()
    .uri(&format!("/api/books/{}", book_id))
    .insert_header(bearer(&admin_token))
    .set_json(book_json("Dune (Deluxe)", "111", 2500))
    .to_request();
  let updated: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(updated["title"], "Dune (Deluxe)");

  let req = test::TestRequest::get().uri("/api/books").to_request();
  let books: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(books.as_array().map(Vec::len), Some(1));

  let req = test::TestRequest::delete()
    .uri(&format!("/api/books/{}", book_id))
    .insert_header(bearer(&admin_token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::get().uri(&format!("/api/books/{}", book_id)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Book not found");
}

#[actix_web::test]
#[serial]
async fn test_cart_then_place_order_sends_confirmation() {
  setup_tracing();
  let t = test_app();
  let app = test::init_service(App::new().app_data(web::Data::new(t.state.clone())).configure(configure_app_routes)).await;
  let (user, token) = signed_in(&t, "reader", Role::User).await;
  let a = insert_book(&t.store, "A", 10).await;
  let b = insert_book(&t.store, "B", 5).await;

  for (book_id, quantity) in [(a.id, 1), (a.id, 1), (b.id, 1)] {
    let req = test::TestRequest::post()
      .uri("/api/cart/add")
      .insert_header(bearer(&token))
      .set_json(json!({ "bookId": book_id, "quantity": quantity }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
  }

  let req = test::TestRequest::get().uri("/api/cart").insert_header(bearer(&token)).to_request();
  let cart: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(cart["lines"].as_array().map(Vec::len), Some(2));
  assert_eq!(cart["lines"][0]["quantity"], 2);
  assert_eq!(cart["totalCartPriceCents"], 25);

  let req = test::TestRequest::post().uri("/api/order/place").insert_header(bearer(&token)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let order: Value = test::read_body_json(resp).await;
  assert_eq!(order["totalCents"], 25);
  assert_eq!(order["lines"][0]["title"], "A");

  let stored_cart = t.store.find_cart(user.id).await.unwrap().unwrap();
  assert!(stored_cart.lines.is_empty());

  let sent = t.mailer.sent();
  assert_eq!(sent.len(), 1);
  assert_eq!(sent[0].to, user.email);
  assert!(sent[0].html_body.contains(order["id"].as_str().unwrap()));

  let req = test::TestRequest::get().uri("/api/order/user").insert_header(bearer(&token)).to_request();
  let orders: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(orders.as_array().map(Vec::len), Some(1));

  // A second placement finds nothing to buy.
  let req = test::TestRequest::post().uri("/api/order/place").insert_header(bearer(&token)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Cart is empty");
}

#[actix_web::test]
#[serial]
async fn test_cart_line_edits_and_bad_input() {
  setup_tracing();
  let t = test_app();
  let app = test::init_service(App::new().app_data(web::Data::new(t.state.clone())).configure(configure_app_routes)).await;
  let (_, token) = signed_in(&t, "reader", Role::User).await;
  let book = insert_book(&t.store, "A", 700).await;

  let req = test::TestRequest::post()
    .uri("/api/cart/add")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": book.id, "quantity": 0 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::post()
    .uri("/api/cart/add")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": Uuid::new_v4(), "quantity": 1 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::post()
    .uri("/api/cart/add")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": "not-a-uuid", "quantity": 1 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

  let req = test::TestRequest::post()
    .uri("/api/cart/add")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": book.id, "quantity": 1 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::put()
    .uri("/api/cart/update")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": book.id, "quantity": 4 }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["cartLine"]["quantity"], 4);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/cart/remove/{}", book.id))
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/cart/remove/{}", book.id))
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::delete().uri("/api/cart/clear").insert_header(bearer(&token)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
#[serial]
async fn test_orders_are_private() {
  setup_tracing();
  let t = test_app();
  let app = test::init_service(App::new().app_data(web::Data::new(t.state.clone())).configure(configure_app_routes)).await;
  let (buyer, buyer_token) = signed_in(&t, "buyer", Role::User).await;
  let (_, other_token) = signed_in(&t, "snoop", Role::User).await;
  let book = insert_book(&t.store, "A", 300).await;

  t.state.bookstore.carts.add_line(buyer.id, book.id, 1).await.unwrap();
  let order = t.state.bookstore.orders.place_order(buyer.id).await.unwrap();

  let uri = format!("/api/order/{}", order.id);
  let req = test::TestRequest::get().uri(&uri).insert_header(bearer(&buyer_token)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::get().uri(&uri).insert_header(bearer(&other_token)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::get().uri("/api/order/xyz").insert_header(bearer(&buyer_token)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
#[serial]
async fn test_reviews_and_favorites() {
  setup_tracing();
  let t = test_app();
  let app = test::init_service(App::new().app_data(web::Data::new(t.state.clone())).configure(configure_app_routes)).await;
  let (_, token) = signed_in(&t, "critic", Role::User).await;
  let (_, other_token) = signed_in(&t, "rival", Role::User).await;
  let book = insert_book(&t.store, "A", 300).await;

  let req = test::TestRequest::post()
    .uri("/api/reviews")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": book.id, "rating": 6, "reviewText": "Too good" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::post()
    .uri("/api/reviews")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": book.id, "rating": 5, "reviewText": "Loved it" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let review: Value = test::read_body_json(resp).await;
  let review_id = review["id"].as_str().unwrap().to_string();

  let req = test::TestRequest::get().uri(&format!("/api/reviews/{}", book.id)).to_request();
  let reviews: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(reviews[0]["username"], "critic");
  assert_eq!(reviews[0]["rating"], 5);

  let req = test::TestRequest::put()
    .uri(&format!("/api/reviews/{}", review_id))
    .insert_header(bearer(&other_token))
    .set_json(json!({ "rating": 1, "reviewText": "Hijacked" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::put()
    .uri(&format!("/api/reviews/{}", review_id))
    .insert_header(bearer(&token))
    .set_json(json!({ "rating": 4, "reviewText": "Still good" }))
    .to_request();
  let edited: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(edited["rating"], 4);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/reviews/{}", review_id))
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::post()
    .uri("/api/favorites")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": book.id }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let favorite: Value = test::read_body_json(resp).await;
  let favorite_id = favorite["id"].as_str().unwrap().to_string();

  let req = test::TestRequest::post()
    .uri("/api/favorites")
    .insert_header(bearer(&token))
    .set_json(json!({ "bookId": book.id }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::get().uri("/api/favorites").insert_header(bearer(&token)).to_request();
  let favorites: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(favorites[0]["book"]["title"], "A");

  let req = test::TestRequest::delete()
    .uri(&format!("/api/favorites/{}", favorite_id))
    .insert_header(bearer(&other_token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/favorites/{}", favorite_id))
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  assert!(t.store.find_book(book.id).await.unwrap().is_some());
}
