//! Punch notifications.
//!
//! Recording a punch can notify someone. Delivery is behind the
//! [`Notifier`] trait; [`LogNotifier`] writes each message to the tracing
//! log, one event per recipient, and [`DisabledNotifier`] drops it.

use std::sync::Arc;

use tracing::info;

use crate::config::NotifierSettings;
use crate::error::{PayrollError, PayrollResult};

/// A message to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

/// Delivers notifications.
pub trait Notifier: Send + Sync {
    /// Delivers one message.
    fn notify(&self, notification: &Notification) -> PayrollResult<()>;
}

/// Writes notifications to the tracing log.
///
/// A notifier with no recipients fails with `NotificationFailed`.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender: String,
    recipients: Vec<String>,
}

impl LogNotifier {
    /// Creates a notifier for the given sender and recipients.
    pub fn new(sender: impl Into<String>, recipients: Vec<String>) -> Self {
        Self {
            sender: sender.into(),
            recipients,
        }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) -> PayrollResult<()> {
        if self.recipients.is_empty() {
            return Err(PayrollError::NotificationFailed {
                message: format!("no recipients for '{}'", notification.subject),
            });
        }

        for recipient in &self.recipients {
            info!(
                sender = %self.sender,
                recipient = %recipient,
                subject = %notification.subject,
                body = %notification.body,
                "Notification sent"
            );
        }
        Ok(())
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn notify(&self, _notification: &Notification) -> PayrollResult<()> {
        Ok(())
    }
}

/// Builds the notifier described by the settings.
pub fn notifier_from_settings(settings: &NotifierSettings) -> Arc<dyn Notifier> {
    if settings.enabled && !settings.recipients.is_empty() {
        Arc::new(LogNotifier::new(
            settings.sender.clone(),
            settings.recipients.clone(),
        ))
    } else {
        Arc::new(DisabledNotifier)
    }
}
