//! Notification dispatch.

use leavebook_core::notification::{Notification, NotificationTemplate};
use std::sync::{Mutex, PoisonError};

/// Delivers notifications. Transport (email, push) lives behind this trait.
pub trait NotificationDispatcher: Send + Sync {
    /// Hands a notification over for delivery.
    fn dispatch(&self, notification: Notification);
}

/// Logs each notification as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl NotificationDispatcher for TracingDispatcher {
    fn dispatch(&self, notification: Notification) {
        tracing::info!(
            employee_id = %notification.employee_id,
            template = %notification.template,
            payload = %notification.payload,
            "notification dispatched"
        );
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingDispatcher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything dispatched so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Templates dispatched so far, oldest first.
    #[must_use]
    pub fn templates(&self) -> Vec<NotificationTemplate> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|n| n.template)
            .collect()
    }

    /// Number of notifications with the given template.
    #[must_use]
    pub fn count(&self, template: NotificationTemplate) -> usize {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.template == template)
            .count()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
