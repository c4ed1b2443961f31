//! CloseDiscussionHandler - freezes a discussion and opens its poll.

use std::sync::Arc;

use crate::application::{Newsletter, RoundLocks};
use crate::domain::discussion::Discussion;
use crate::domain::foundation::{DiscussionId, DomainError, ErrorCode, UserId};
use crate::domain::poll::Poll;
use crate::domain::round::Round;
use crate::ports::{
    DiscussionRepository, RoundRepository, RoundTransition, TransitionWriter,
};

/// Command to close a discussion and open voting over its proposals.
#[derive(Debug, Clone)]
pub struct CloseDiscussionCommand {
    pub discussion_id: DiscussionId,
    pub actor: UserId,
}

/// Result of a successful discussion close.
#[derive(Debug, Clone)]
pub struct CloseDiscussionResult {
    pub round: Round,
    pub discussion: Discussion,
    pub poll: Poll,
}

/// Handler for closing discussions.
///
/// Runs under the round lock and reloads the discussion once the lock is
/// held, so of two simultaneous closes exactly one freezes the post list;
/// the other observes the committed close.
pub struct CloseDiscussionHandler {
    rounds: Arc<dyn RoundRepository>,
    discussions: Arc<dyn DiscussionRepository>,
    writer: Arc<dyn TransitionWriter>,
    locks: Arc<RoundLocks>,
    newsletter: Arc<Newsletter>,
}

impl CloseDiscussionHandler {
    pub fn new(
        rounds: Arc<dyn RoundRepository>,
        discussions: Arc<dyn DiscussionRepository>,
        writer: Arc<dyn TransitionWriter>,
        locks: Arc<RoundLocks>,
        newsletter: Arc<Newsletter>,
    ) -> Self {
        Self {
            rounds,
            discussions,
            writer,
            locks,
            newsletter,
        }
    }

    pub async fn handle(
        &self,
        cmd: CloseDiscussionCommand,
    ) -> Result<CloseDiscussionResult, DomainError> {
        let discussion = self.load_discussion(cmd.discussion_id).await?;
        let lock = self.locks.lock_for(discussion.round_id());
        let _guard = lock.lock().await;

        // Reload under the lock; a concurrent close may have committed.
        let mut discussion = self.load_discussion(cmd.discussion_id).await?;
        let mut round = self
            .rounds
            .find_by_id(discussion.round_id())
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::RoundNotFound,
                    format!("Round not found: {}", discussion.round_id()),
                )
            })?;
        if cmd.actor != *round.owner() {
            return Err(DomainError::new(
                ErrorCode::PermissionDenied,
                "Only the round owner may close a discussion",
            ));
        }

        discussion.close()?;
        let poll = Poll::from_discussion(&discussion, cmd.actor)?;
        round.link_poll(discussion.topic(), poll.id())?;

        self.writer
            .commit(
                RoundTransition::new(round.clone())
                    .with_discussion(discussion.clone())
                    .with_poll(poll.clone()),
            )
            .await?;

        self.newsletter.poll_opened(&poll).await;

        Ok(CloseDiscussionResult {
            round,
            discussion,
            poll,
        })
    }

    async fn load_discussion(&self, id: DiscussionId) -> Result<Discussion, DomainError> {
        self.discussions.find_by_id(id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::DiscussionNotFound,
                format!("Discussion not found: {}", id),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::InMemoryNotificationSink;
    use crate::adapters::storage::InMemoryClubStore;
    use crate::application::handlers::discussion::{AddPostCommand, AddPostHandler};
    use crate::application::handlers::round::{StartRoundCommand, StartRoundHandler};
    use crate::domain::discussion::PostDraft;
    use crate::domain::foundation::Topic;
    use crate::ports::PollRepository;

    fn member(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            author: "Author".to_string(),
            text: "Text".to_string(),
            page_count: None,
            url: None,
            image_url: None,
        }
    }

    struct Fixture {
        store: Arc<InMemoryClubStore>,
        sink: Arc<InMemoryNotificationSink>,
        start_round: StartRoundHandler,
        add_post: AddPostHandler,
        close_discussion: CloseDiscussionHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryClubStore::new());
        let sink = Arc::new(InMemoryNotificationSink::new());
        let newsletter = Arc::new(Newsletter::new(sink.clone(), "https://club.example"));
        let locks = Arc::new(RoundLocks::new());
        Fixture {
            store: store.clone(),
            sink,
            start_round: StartRoundHandler::new(store.clone(), newsletter.clone()),
            add_post: AddPostHandler::new(store.clone(), locks.clone(), newsletter.clone()),
            close_discussion: CloseDiscussionHandler::new(
                store.clone(),
                store.clone(),
                store,
                locks,
                newsletter,
            ),
        }
    }

    async fn round_with_posts(fx: &Fixture, titles: &[&str]) -> CloseDiscussionCommand {
        let started = fx
            .start_round
            .handle(StartRoundCommand {
                topic: Topic::Books,
                title: "April".to_string(),
                description: String::new(),
                owner: member("mod"),
            })
            .await
            .unwrap();
        for title in titles {
            fx.add_post
                .handle(AddPostCommand {
                    discussion_id: started.discussion.id(),
                    draft: draft(title),
                    owner: member("alice"),
                })
                .await
                .unwrap();
        }
        CloseDiscussionCommand {
            discussion_id: started.discussion.id(),
            actor: member("mod"),
        }
    }

    #[tokio::test]
    async fn close_freezes_posts_and_opens_poll() {
        let fx = fixture();
        let cmd = round_with_posts(&fx, &["A", "B"]).await;

        let result = fx.close_discussion.handle(cmd).await.unwrap();

        assert!(result.discussion.is_closed());
        assert_eq!(result.poll.options().len(), 2);
        assert_eq!(result.round.book_poll_id(), Some(result.poll.id()));

        let stored = PollRepository::find_by_id(&*fx.store, result.poll.id())
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn poll_options_preserve_submission_order() {
        let fx = fixture();
        let cmd = round_with_posts(&fx, &["First", "Second", "Third"]).await;

        let result = fx.close_discussion.handle(cmd).await.unwrap();

        let titles: Vec<&str> = result
            .poll
            .options()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn close_without_posts_fails_with_empty_proposal_set() {
        let fx = fixture();
        let cmd = round_with_posts(&fx, &[]).await;

        let err = fx.close_discussion.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyProposalSet);
    }

    #[tokio::test]
    async fn second_close_fails_with_discussion_closed() {
        let fx = fixture();
        let cmd = round_with_posts(&fx, &["A"]).await;

        fx.close_discussion.handle(cmd.clone()).await.unwrap();
        let err = fx.close_discussion.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscussionClosed);
    }

    #[tokio::test]
    async fn non_owner_cannot_close() {
        let fx = fixture();
        let mut cmd = round_with_posts(&fx, &["A"]).await;
        cmd.actor = member("alice");

        let err = fx.close_discussion.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[tokio::test]
    async fn announces_the_open_poll() {
        let fx = fixture();
        let cmd = round_with_posts(&fx, &["A"]).await;

        let result = fx.close_discussion.handle(cmd).await.unwrap();

        let polls: Vec<_> = fx
            .sink
            .sent()
            .into_iter()
            .filter(|n| n.template == "new-poll")
            .collect();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].subject, result.poll.title());
    }
}
