//! Structured-log notification sink.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, NotificationSink};

/// Sink that emits every notification as a structured log event.
///
/// This is the default sink when no mail or chat integration is
/// configured, so lifecycle announcements stay visible to operators.
#[derive(Debug, Default)]
pub struct LogNotificationSink;

impl LogNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        info!(
            audience = %notification.audience,
            template = %notification.template,
            subject = %notification.subject,
            body = %notification.body,
            "notification dispatched"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_never_fails() {
        let sink = LogNotificationSink::new();
        let result = sink
            .send(Notification::basic_event("new-poll", "Vote: April", "Poll is open"))
            .await;
        assert!(result.is_ok());
    }
}
