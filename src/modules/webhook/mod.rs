//! Outgoing webhook for user lifecycle events
//!
//! Posts events to an external automation endpoint. Delivery is best-effort:
//! one attempt, fixed timeout, failures are logged and swallowed.

mod notifier;

pub use notifier::{WebhookEvent, WebhookNotifier};
