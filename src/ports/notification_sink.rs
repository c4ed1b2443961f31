//! Notification sink port.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Audience tag for ordinary club lifecycle events.
pub const AUDIENCE_BASIC_EVENTS: &str = "basic-events";

/// One outbound notification. Rendering and delivery belong to the sink;
/// the core only supplies the template key and the composed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub audience: String,
    pub template: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn basic_event(
        template: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            audience: AUDIENCE_BASIC_EVENTS.to_string(),
            template: template.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Port for best-effort outbound notifications.
///
/// Callers treat delivery as fire-and-forget: errors are logged by the
/// caller and never propagated into a state transition, which has already
/// committed by the time the notification is attempted.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_sink_is_object_safe() {
        fn _accepts_dyn(_sink: &dyn NotificationSink) {}
    }

    #[test]
    fn basic_event_uses_basic_audience() {
        let n = Notification::basic_event("new-poll", "subject", "body");
        assert_eq!(n.audience, AUDIENCE_BASIC_EVENTS);
        assert_eq!(n.template, "new-poll");
    }
}
