// src/lib.rs

//! Bookstore: the domain core of an online bookstore backend.
//!
//! The crate provides:
//!  - Domain entities (books, carts, orders, reviews, favorites, users) with
//!    money kept as integer cents.
//!  - Repository traits bundled as [`Store`], plus an in-memory implementation.
//!  - A small async step-pipeline engine ([`workflow`]) used to run the
//!    add-to-cart and place-order flows.
//!  - Services grouped in the [`Bookstore`] facade, which is what a web layer
//!    talks to.
//!
//! Transport concerns (HTTP, sessions, password hashing, SQL) live in the
//! server crate.

pub mod error;
pub mod flows;
pub mod models;
pub mod notify;
pub mod services;
pub mod store;
pub mod validation;
pub mod workflow;

pub use crate::error::{BookstoreError, Result};
pub use crate::notify::Notifier;
pub use crate::services::{Bookstore, CartService, CatalogService, FavoriteService, OrderService, ReviewService};
pub use crate::store::{
  BookRepository, CartRepository, FavoriteRepository, MemoryStore, OrderRepository, ReviewRepository, Store,
  UserRepository,
};
pub use crate::workflow::{ContextData, Pipeline, PipelineControl, PipelineResult, WorkflowError, Workflows};
