//! Recording notification sink for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, NotificationSink};

/// Sink that records every notification it receives.
///
/// Test-only observability: assertions inspect `sent()` to verify which
/// announcements a transition produced.
#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    sent: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, in dispatch order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .expect("InMemoryNotificationSink: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        self.sent
            .lock()
            .expect("InMemoryNotificationSink: lock poisoned")
            .push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_notifications_in_order() {
        let sink = InMemoryNotificationSink::new();
        sink.send(Notification::basic_event("a", "first", ""))
            .await
            .unwrap();
        sink.send(Notification::basic_event("b", "second", ""))
            .await
            .unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].template, "a");
        assert_eq!(sent[1].template, "b");
    }
}
