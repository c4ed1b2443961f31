//! Lifecycle announcements.
//!
//! Composes the notification for each club event and hands it to the sink.
//! Delivery is strictly best-effort: the state transition has committed by
//! the time an announcement goes out, so a sink failure is logged and
//! swallowed, never surfaced to the caller.

use std::sync::Arc;
use tracing::warn;

use crate::domain::book::Book;
use crate::domain::discussion::{Discussion, Post};
use crate::domain::poll::Poll;
use crate::domain::round::Round;
use crate::ports::{Notification, NotificationSink};

/// Club-wide announcement service.
pub struct Newsletter {
    sink: Arc<dyn NotificationSink>,
    base_url: String,
}

impl Newsletter {
    pub fn new(sink: Arc<dyn NotificationSink>, base_url: impl Into<String>) -> Self {
        Self {
            sink,
            base_url: base_url.into(),
        }
    }

    async fn dispatch(&self, notification: Notification) {
        let template = notification.template.clone();
        if let Err(err) = self.sink.send(notification).await {
            warn!(template = %template, error = %err, "notification delivery failed");
        }
    }

    /// A new round has started and its first discussion is open.
    pub async fn round_started(&self, round: &Round, discussion: &Discussion) {
        self.dispatch(Notification::basic_event(
            round.topic().profile().new_round_template,
            round.title(),
            format!(
                "{}\n{}/discussions/{}",
                discussion.title(),
                self.base_url,
                discussion.id()
            ),
        ))
        .await;
    }

    /// A member added a proposal to an open discussion.
    pub async fn post_added(&self, discussion: &Discussion, post: &Post) {
        self.dispatch(Notification::basic_event(
            discussion.topic().profile().new_post_template,
            post.title.clone(),
            format!(
                "{}\n{}/discussions/{}",
                post.text,
                self.base_url,
                discussion.id()
            ),
        ))
        .await;
    }

    /// A discussion closed and voting is open.
    pub async fn poll_opened(&self, poll: &Poll) {
        self.dispatch(Notification::basic_event(
            "new-poll",
            poll.title(),
            format!("{}/polls/{}", self.base_url, poll.id()),
        ))
        .await;
    }

    /// A theme poll resolved and the follow-up proposal discussion is open.
    pub async fn discussion_opened(&self, discussion: &Discussion) {
        self.dispatch(Notification::basic_event(
            "new-discussion",
            discussion.title(),
            format!(
                "{}\n{}/discussions/{}",
                discussion.description(),
                self.base_url,
                discussion.id()
            ),
        ))
        .await;
    }

    /// A book poll resolved and the round has its book.
    pub async fn book_chosen(&self, book: &Book) {
        self.dispatch(Notification::basic_event(
            "voting-results",
            book.post().title.clone(),
            format!(
                "{} by {}\n{}/rounds/{}",
                book.post().title,
                book.post().author,
                self.base_url,
                book.round_id()
            ),
        ))
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::InMemoryNotificationSink;
    use crate::domain::foundation::{Topic, UserId};
    use crate::ports::AUDIENCE_BASIC_EVENTS;
    use async_trait::async_trait;
    use crate::domain::foundation::{DomainError, ErrorCode};

    struct FailingSink;

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn send(&self, _notification: Notification) -> Result<(), DomainError> {
            Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated delivery failure",
            ))
        }
    }

    fn member(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn round_started_uses_topic_template() {
        let sink = Arc::new(InMemoryNotificationSink::new());
        let newsletter = Newsletter::new(sink.clone(), "https://club.example");

        let round = Round::new(Topic::Books, "April".to_string(), member("mod")).unwrap();
        let discussion = Discussion::new(
            round.id(),
            Topic::Books,
            "Book proposals: April".to_string(),
            String::new(),
            member("mod"),
        )
        .unwrap();

        newsletter.round_started(&round, &discussion).await;

        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].template, "new-book-round");
        assert_eq!(sent[0].audience, AUDIENCE_BASIC_EVENTS);
        assert!(sent[0].body.contains(&discussion.id().to_string()));
    }

    #[tokio::test]
    async fn sink_failure_is_swallowed() {
        let newsletter = Newsletter::new(Arc::new(FailingSink), "https://club.example");
        let round = Round::new(Topic::Themes, "May".to_string(), member("mod")).unwrap();
        let discussion = Discussion::new(
            round.id(),
            Topic::Themes,
            "Theme proposals: May".to_string(),
            String::new(),
            member("mod"),
        )
        .unwrap();

        // Must not panic or propagate.
        newsletter.round_started(&round, &discussion).await;
    }
}
