// src/notify/sink.rs

//! Pluggable notification sinks.
//!
//! - `WebhookSink` posts to a Slack-compatible incoming webhook.
//! - `LogSink` writes notifications to the log; used when notifications are
//!   enabled without a webhook.
//! - Tests provide their own sinks that record or reject messages.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::NotifyError;
use crate::notify::Notification;

pub type NotifyFuture<'a> = Pin<Box<dyn Future<Output = Result<(), NotifyError>> + Send + 'a>>;

/// Trait abstracting where notifications are delivered.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification. Callers bound the duration and discard
    /// failures; implementations should not retry.
    fn send<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a>;
}

/// JSON body of a Slack-compatible incoming webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    icon_emoji: &'a str,
}

/// Posts notifications to an incoming webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    /// Build a sink whose HTTP requests give up after `request_timeout`.
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl NotificationSink for WebhookSink {
    fn send<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a> {
        Box::pin(async move {
            let payload = WebhookPayload {
                text: &notification.message,
                icon_emoji: notification.icon.as_str(),
            };

            let response = self.client.post(&self.url).json(&payload).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(NotifyError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            debug!(status = status.as_u16(), "webhook accepted notification");
            Ok(())
        })
    }
}

/// Writes notifications to the log instead of an external channel.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn send<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a> {
        Box::pin(async move {
            info!(
                icon = notification.icon.as_str(),
                "notification: {}",
                notification.message
            );
            Ok(())
        })
    }
}
