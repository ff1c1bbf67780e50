// src/notify/mod.rs

//! Job notifications.
//!
//! - [`format`] turns a batch of tracker events into one message plus an icon
//!   hint.
//! - [`sink`] provides the `NotificationSink` trait, the webhook sink used in
//!   production and a logging sink.
//!
//! Delivery is best effort: a failed or slow sink never affects tracking.

pub mod format;
pub mod sink;

pub use format::{format_batch, shutdown_notification};
pub use sink::{LogSink, NotificationSink, WebhookSink};

/// Icon hint sent along with a message. Sinks that understand emoji
/// shortcodes (Slack-style webhooks) show it next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Started,
    Completed,
    Neutral,
    Shutdown,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Started => ":rocket:",
            Icon::Completed => ":white_check_mark:",
            Icon::Neutral => ":bell:",
            Icon::Shutdown => ":octagonal_sign:",
        }
    }
}

/// A formatted message ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub icon: Icon,
}
