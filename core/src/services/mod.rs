// bookstore/src/services/mod.rs

//! Business operations over a [`Store`], grouped per concern and bundled in
//! the [`Bookstore`] facade.

pub mod cart_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod order_service;
pub mod review_service;

pub use cart_service::CartService;
pub use catalog_service::CatalogService;
pub use favorite_service::FavoriteService;
pub use order_service::OrderService;
pub use review_service::ReviewService;

use crate::error::Result;
use crate::flows::register_all_flows;
use crate::notify::Notifier;
use crate::store::Store;
use crate::workflow::Workflows;
use std::sync::Arc;

/// Every bookstore service over one store and notifier. Cheap to clone.
#[derive(Clone)]
pub struct Bookstore {
  pub carts: CartService,
  pub orders: OrderService,
  pub catalog: CatalogService,
  pub reviews: ReviewService,
  pub favorites: FavoriteService,
  store: Arc<dyn Store>,
}

impl Bookstore {
  /// Registers the bookstore pipelines and wires up the services.
  pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>) -> Result<Self> {
    let workflows = Arc::new(Workflows::new());
    register_all_flows(&workflows)?;

    Ok(Self {
      carts: CartService::new(store.clone(), workflows.clone()),
      orders: OrderService::new(store.clone(), notifier, workflows),
      catalog: CatalogService::new(store.clone()),
      reviews: ReviewService::new(store.clone()),
      favorites: FavoriteService::new(store.clone()),
      store,
    })
  }

  pub fn store(&self) -> &Arc<dyn Store> {
    &self.store
  }
}
