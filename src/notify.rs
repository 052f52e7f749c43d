//! User-facing error surface.
//!
//! The message texts are what the storefront shows and are kept verbatim.

use tokio::sync::mpsc;
use tracing::warn;

pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
pub const ADD_PRODUCT_FAILED: &str = "Erro na adição do produto";
pub const REMOVE_PRODUCT_FAILED: &str = "Erro na remoção do produto";
pub const UPDATE_AMOUNT_FAILED: &str = "Erro na alteração de quantidade do produto";

/// Fire-and-forget sink for messages shown to the user.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Writes notifications to the log. Used when no UI is attached.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(notification = message, "User notification");
    }
}

/// A notification as delivered to a [`ChannelNotifier`] receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

/// Forwards notifications to a channel a UI (or a test) drains.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn error(&self, message: &str) {
        if self
            .sender
            .send(Notification { message: message.to_string() })
            .is_err()
        {
            warn!(notification = message, "Notification dropped, no receiver");
        }
    }
}
