// bookstore_server/src/services/mailer.rs

//! Order confirmation mail. Rendering is real; delivery is simulated and
//! logged, with every message kept in an outbox for inspection.

use async_trait::async_trait;
use bookstore::models::{format_cents, OrderView};
use bookstore::{BookstoreError, Notifier};
use parking_lot::Mutex;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct SentEmail {
  pub to: String,
  pub from: String,
  pub subject: String,
  pub html_body: String,
  pub message_id: String,
}

#[derive(Debug)]
pub struct MockMailer {
  sender: String,
  outbox: Mutex<Vec<SentEmail>>,
}

impl MockMailer {
  pub fn new(sender: impl Into<String>) -> Self {
    Self {
      sender: sender.into(),
      outbox: Mutex::new(Vec::new()),
    }
  }

  pub fn sent(&self) -> Vec<SentEmail> {
    self.outbox.lock().clone()
  }
}

fn escape_html(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

const CELL: &str = "border: 1px solid #dddddd; text-align: left; padding: 8px;";

pub fn render_order_confirmation(order: &OrderView) -> String {
  let rows: String = order
    .lines
    .iter()
    .map(|line| {
      format!(
        "<tr><td style=\"{c}\">{}</td><td style=\"{c}\">{}</td><td style=\"{c}\">{}</td><td style=\"{c}\">{}</td></tr>",
        escape_html(line.title.as_deref().unwrap_or("Unavailable title")),
        escape_html(line.author.as_deref().unwrap_or("-")),
        line.quantity,
        format_cents(line.price_cents),
        c = CELL,
      )
    })
    .collect();

  format!(
    r#"<div style="font-family: Arial, sans-serif; line-height: 1.5; padding: 20px;">
<h1>Order Confirmation</h1>
<p>Thank you for your order. Below are your order details:</p>
<h2>Order ID: {id}</h2>
<p><strong>Order Date:</strong> {date}</p>
<h3>Order Summary:</h3>
<table style="width: 100%; border-collapse: collapse;">
<thead><tr><th style="{c}">Title</th><th style="{c}">Author</th><th style="{c}">Quantity</th><th style="{c}">Price</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<h3>Total Price: {total}</h3>
<p>If you have any questions, feel free to contact us.</p>
<p>Thank you for shopping with us!</p>
</div>"#,
    id = order.id,
    date = order.created_at.format("%Y-%m-%d"),
    c = CELL,
    rows = rows,
    total = format_cents(order.total_cents),
  )
}

#[async_trait]
impl Notifier for MockMailer {
  #[instrument(name = "MockMailer::send_order_confirmation", skip(self, email, order), fields(order_id = %order.id))]
  async fn send_order_confirmation(&self, email: &str, order: &OrderView) -> Result<(), BookstoreError> {
    if email.trim().is_empty() {
      return Err(BookstoreError::Notification("Recipient address is empty".to_string()));
    }
    let sent = SentEmail {
      to: email.to_string(),
      from: self.sender.clone(),
      subject: "Order Confirmation".to_string(),
      html_body: render_order_confirmation(order),
      message_id: format!("mock_email_{}", uuid::Uuid::new_v4()),
    };
    tokio::time::sleep(std::time::Duration::from_millis(2)).await; // Simulated relay latency
    info!(message_id = %sent.message_id, "Mock confirmation email sent.");
    self.outbox.lock().push(sent);
    Ok(())
  }
}
