// bookstore/src/notify.rs

use crate::error::BookstoreError;
use crate::models::OrderView;
use async_trait::async_trait;

/// Outbound customer notifications. Delivery failures are reported but never
/// undo the operation that triggered them.
#[async_trait]
pub trait Notifier: Send + Sync {
  async fn send_order_confirmation(&self, email: &str, order: &OrderView) -> Result<(), BookstoreError>;
}
