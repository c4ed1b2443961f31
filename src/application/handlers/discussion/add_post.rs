//! AddPostHandler - adds a proposal to an open discussion.

use std::sync::Arc;

use crate::application::{Newsletter, RoundLocks};
use crate::domain::discussion::{Discussion, Post, PostDraft};
use crate::domain::foundation::{DiscussionId, DomainError, ErrorCode, UserId};
use crate::ports::DiscussionRepository;

/// Command to add a proposal post.
#[derive(Debug, Clone)]
pub struct AddPostCommand {
    pub discussion_id: DiscussionId,
    pub draft: PostDraft,
    pub owner: UserId,
}

/// Result of a successful post addition.
#[derive(Debug, Clone)]
pub struct AddPostResult {
    pub discussion: Discussion,
    pub post: Post,
}

/// Handler for adding posts.
///
/// Runs under the round lock so a post can never slip into a discussion
/// that a concurrent close has already frozen: the reload after lock
/// acquisition observes the committed close and fails cleanly.
pub struct AddPostHandler {
    discussions: Arc<dyn DiscussionRepository>,
    locks: Arc<RoundLocks>,
    newsletter: Arc<Newsletter>,
}

impl AddPostHandler {
    pub fn new(
        discussions: Arc<dyn DiscussionRepository>,
        locks: Arc<RoundLocks>,
        newsletter: Arc<Newsletter>,
    ) -> Self {
        Self {
            discussions,
            locks,
            newsletter,
        }
    }

    pub async fn handle(&self, cmd: AddPostCommand) -> Result<AddPostResult, DomainError> {
        let discussion = self.load(cmd.discussion_id).await?;
        let lock = self.locks.lock_for(discussion.round_id());
        let _guard = lock.lock().await;

        let mut discussion = self.load(cmd.discussion_id).await?;
        let post = discussion.add_post(cmd.draft, cmd.owner)?.clone();
        self.discussions.update(&discussion).await?;

        self.newsletter.post_added(&discussion, &post).await;

        Ok(AddPostResult { discussion, post })
    }

    async fn load(&self, id: DiscussionId) -> Result<Discussion, DomainError> {
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
    use crate::domain::foundation::{RoundId, Topic};

    fn member(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            author: "Author".to_string(),
            text: "Text".to_string(),
            page_count: Some(200),
            url: None,
            image_url: None,
        }
    }

    async fn fixture() -> (
        Arc<InMemoryClubStore>,
        Arc<InMemoryNotificationSink>,
        AddPostHandler,
        DiscussionId,
    ) {
        let store = Arc::new(InMemoryClubStore::new());
        let sink = Arc::new(InMemoryNotificationSink::new());
        let newsletter = Arc::new(Newsletter::new(sink.clone(), "https://club.example"));
        let handler = AddPostHandler::new(store.clone(), Arc::new(RoundLocks::new()), newsletter);

        let discussion = Discussion::new(
            RoundId::new(),
            Topic::Books,
            "Book proposals: April".to_string(),
            String::new(),
            member("mod"),
        )
        .unwrap();
        let id = discussion.id();
        DiscussionRepository::save(&*store, &discussion)
            .await
            .unwrap();

        (store, sink, handler, id)
    }

    #[tokio::test]
    async fn adds_post_and_persists_it() {
        let (store, _, handler, discussion_id) = fixture().await;

        let result = handler
            .handle(AddPostCommand {
                discussion_id,
                draft: draft("The Dispossessed"),
                owner: member("alice"),
            })
            .await
            .unwrap();

        assert_eq!(result.post.title, "The Dispossessed");
        assert_eq!(result.post.owner, member("alice"));

        let stored = DiscussionRepository::find_by_id(&*store, discussion_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.posts().len(), 1);
    }

    #[tokio::test]
    async fn announces_the_new_post() {
        let (_, sink, handler, discussion_id) = fixture().await;

        handler
            .handle(AddPostCommand {
                discussion_id,
                draft: draft("Solaris"),
                owner: member("bob"),
            })
            .await
            .unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].template, "new-book-proposal");
        assert_eq!(sent[0].subject, "Solaris");
    }

    #[tokio::test]
    async fn closed_discussion_rejects_posts() {
        let (store, sink, handler, discussion_id) = fixture().await;
        let mut discussion = DiscussionRepository::find_by_id(&*store, discussion_id)
            .await
            .unwrap()
            .unwrap();
        discussion
            .add_post(draft("Existing"), member("alice"))
            .unwrap();
        discussion.close().unwrap();
        DiscussionRepository::update(&*store, &discussion)
            .await
            .unwrap();
        let sent_before = sink.sent().len();

        let err = handler
            .handle(AddPostCommand {
                discussion_id,
                draft: draft("Too late"),
                owner: member("bob"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DiscussionClosed);
        assert_eq!(sink.sent().len(), sent_before);
    }

    #[tokio::test]
    async fn missing_discussion_fails_with_not_found() {
        let (_, _, handler, _) = fixture().await;

        let err = handler
            .handle(AddPostCommand {
                discussion_id: DiscussionId::new(),
                draft: draft("Nowhere"),
                owner: member("alice"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscussionNotFound);
    }
}
