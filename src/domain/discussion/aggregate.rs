//! Discussion aggregate entity.
//!
//! A discussion collects proposal posts for one phase of a round. Posts are
//! owned by the discussion and kept in submission order. Once the discussion
//! closes, the post list is frozen: no further posts are accepted and the
//! ordered list becomes the option snapshot for the poll that follows.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DiscussionId, DomainError, ErrorCode, PostId, RoundId, Timestamp, Topic, UserId,
};

/// A single proposal within a discussion. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub discussion_id: DiscussionId,
    pub title: String,
    pub author: String,
    pub text: String,
    pub page_count: Option<u32>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub owner: UserId,
    pub created_at: Timestamp,
}

/// Client-supplied fields of a new proposal.
///
/// The discussion assigns identity and ordering; anything id-like sent by
/// the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub author: String,
    pub text: String,
    pub page_count: Option<u32>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

/// Discussion aggregate - ordered proposal collection for one round phase.
///
/// # Invariants
///
/// - Posts are ordered by submission time
/// - Once closed, the post set is frozen and `add_post` always fails
/// - A discussion closes exactly once and is never re-opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    id: DiscussionId,
    round_id: RoundId,
    topic: Topic,
    title: String,
    description: String,
    closed: bool,
    posts: Vec<Post>,
    owner: UserId,
    created_at: Timestamp,
}

impl Discussion {
    /// Create a new open discussion with no posts.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty
    pub fn new(
        round_id: RoundId,
        topic: Topic,
        title: String,
        description: String,
        owner: UserId,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        Ok(Self {
            id: DiscussionId::new(),
            round_id,
            topic,
            title,
            description,
            closed: false,
            posts: Vec::new(),
            owner,
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> DiscussionId {
        self.id
    }

    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Posts in submission order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Append a new proposal, assigning it a fresh identity.
    ///
    /// # Errors
    ///
    /// - `DiscussionClosed` if the discussion has been closed
    /// - `ValidationFailed` if the draft title is empty
    pub fn add_post(&mut self, draft: PostDraft, owner: UserId) -> Result<&Post, DomainError> {
        self.ensure_open()?;
        if draft.title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }

        let post = Post {
            id: PostId::new(),
            discussion_id: self.id,
            title: draft.title,
            author: draft.author,
            text: draft.text,
            page_count: draft.page_count,
            url: draft.url,
            image_url: draft.image_url,
            owner,
            created_at: Timestamp::now(),
        };
        self.posts.push(post);
        Ok(self.posts.last().unwrap())
    }

    /// Close the discussion and freeze its posts.
    ///
    /// Returns the frozen, ordered post list for the caller to snapshot
    /// into a poll. Does not itself create the poll.
    ///
    /// # Errors
    ///
    /// - `DiscussionClosed` if already closed
    /// - `EmptyProposalSet` if it has zero posts
    pub fn close(&mut self) -> Result<&[Post], DomainError> {
        self.ensure_open()?;
        if self.posts.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyProposalSet,
                "At least one proposal is required before closing",
            ));
        }
        self.closed = true;
        Ok(&self.posts)
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.closed {
            return Err(DomainError::new(
                ErrorCode::DiscussionClosed,
                "Discussion is closed",
            )
            .with_detail("discussion_id", self.id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            text: "A classic worth revisiting.".to_string(),
            page_count: Some(183),
            url: None,
            image_url: None,
        }
    }

    fn open_discussion() -> Discussion {
        Discussion::new(
            RoundId::new(),
            Topic::Books,
            "Book proposals: spring".to_string(),
            String::new(),
            member("mod"),
        )
        .unwrap()
    }

    #[test]
    fn new_discussion_is_open_and_empty() {
        let discussion = open_discussion();
        assert!(!discussion.is_closed());
        assert!(discussion.posts().is_empty());
    }

    #[test]
    fn new_discussion_rejects_empty_title() {
        let result = Discussion::new(
            RoundId::new(),
            Topic::Books,
            "  ".to_string(),
            String::new(),
            member("mod"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn add_post_assigns_identity_and_preserves_order() {
        let mut discussion = open_discussion();
        let first = discussion
            .add_post(draft("The Dispossessed"), member("alice"))
            .unwrap()
            .id;
        let second = discussion
            .add_post(draft("Solaris"), member("bob"))
            .unwrap()
            .id;

        assert_ne!(first, second);
        let ids: Vec<PostId> = discussion.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn add_post_rejects_empty_title() {
        let mut discussion = open_discussion();
        let result = discussion.add_post(draft(""), member("alice"));
        assert!(result.is_err());
    }

    #[test]
    fn close_freezes_posts() {
        let mut discussion = open_discussion();
        discussion
            .add_post(draft("The Dispossessed"), member("alice"))
            .unwrap();

        let frozen = discussion.close().unwrap();
        assert_eq!(frozen.len(), 1);
        assert!(discussion.is_closed());
    }

    #[test]
    fn add_post_after_close_fails_with_discussion_closed() {
        let mut discussion = open_discussion();
        discussion
            .add_post(draft("The Dispossessed"), member("alice"))
            .unwrap();
        let len_at_close = discussion.close().unwrap().len();

        let err = discussion
            .add_post(draft("Solaris"), member("bob"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscussionClosed);
        assert_eq!(discussion.posts().len(), len_at_close);
    }

    #[test]
    fn close_twice_fails_with_discussion_closed() {
        let mut discussion = open_discussion();
        discussion
            .add_post(draft("The Dispossessed"), member("alice"))
            .unwrap();
        discussion.close().unwrap();

        let err = discussion.close().unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscussionClosed);
    }

    #[test]
    fn close_empty_fails_with_empty_proposal_set() {
        let mut discussion = open_discussion();
        let err = discussion.close().unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyProposalSet);
    }
}
