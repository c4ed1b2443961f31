//! Round aggregate entity.
//!
//! A round spans one full cycle for a club topic. It references its child
//! discussions and polls by identifier only - children are resolved through
//! the store on demand, never held as live back-references.
//!
//! Rounds are an audit trail: they are never deleted, and every child link
//! transitions unset to set exactly once and is never reset.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookId, DiscussionId, DomainError, ErrorCode, PollId, RoundId, Timestamp, Topic, UserId,
};

/// Round aggregate.
///
/// # Invariants
///
/// - Each child link is write-once (unset -> set, never reset)
/// - At most one child phase is active at a time; the orchestrator closes
///   the current phase before linking the next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    id: RoundId,
    title: String,
    topic: Topic,
    theme_discussion_id: Option<DiscussionId>,
    theme_poll_id: Option<PollId>,
    theme_tiebreaker_poll_id: Option<PollId>,
    book_discussion_id: Option<DiscussionId>,
    book_poll_id: Option<PollId>,
    book_tiebreaker_poll_id: Option<PollId>,
    book_id: Option<BookId>,
    owner: UserId,
    created_at: Timestamp,
}

impl Round {
    /// Create a new round with no children linked yet.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty
    pub fn new(topic: Topic, title: String, owner: UserId) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        Ok(Self {
            id: RoundId::new(),
            title,
            topic,
            theme_discussion_id: None,
            theme_poll_id: None,
            theme_tiebreaker_poll_id: None,
            book_discussion_id: None,
            book_poll_id: None,
            book_tiebreaker_poll_id: None,
            book_id: None,
            owner,
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn theme_discussion_id(&self) -> Option<DiscussionId> {
        self.theme_discussion_id
    }

    pub fn theme_poll_id(&self) -> Option<PollId> {
        self.theme_poll_id
    }

    pub fn theme_tiebreaker_poll_id(&self) -> Option<PollId> {
        self.theme_tiebreaker_poll_id
    }

    pub fn book_discussion_id(&self) -> Option<DiscussionId> {
        self.book_discussion_id
    }

    pub fn book_poll_id(&self) -> Option<PollId> {
        self.book_poll_id
    }

    pub fn book_tiebreaker_poll_id(&self) -> Option<PollId> {
        self.book_tiebreaker_poll_id
    }

    pub fn book_id(&self) -> Option<BookId> {
        self.book_id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Link the proposal discussion for the given topic track.
    pub fn link_discussion(
        &mut self,
        topic: Topic,
        discussion_id: DiscussionId,
    ) -> Result<(), DomainError> {
        let slot = match topic {
            Topic::Themes => &mut self.theme_discussion_id,
            Topic::Books => &mut self.book_discussion_id,
        };
        Self::set_once(slot, discussion_id, "discussion")
    }

    /// Link the poll opened when the topic track's discussion closed.
    pub fn link_poll(&mut self, topic: Topic, poll_id: PollId) -> Result<(), DomainError> {
        let slot = match topic {
            Topic::Themes => &mut self.theme_poll_id,
            Topic::Books => &mut self.book_poll_id,
        };
        Self::set_once(slot, poll_id, "poll")
    }

    /// Link the tiebreaker poll for the topic track.
    pub fn link_tiebreaker_poll(
        &mut self,
        topic: Topic,
        poll_id: PollId,
    ) -> Result<(), DomainError> {
        let slot = match topic {
            Topic::Themes => &mut self.theme_tiebreaker_poll_id,
            Topic::Books => &mut self.book_tiebreaker_poll_id,
        };
        Self::set_once(slot, poll_id, "tiebreaker poll")
    }

    /// Link the winning book.
    pub fn link_book(&mut self, book_id: BookId) -> Result<(), DomainError> {
        Self::set_once(&mut self.book_id, book_id, "book")
    }

    fn set_once<T>(slot: &mut Option<T>, value: T, what: &str) -> Result<(), DomainError> {
        if slot.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Round {} link is already set", what),
            ));
        }
        *slot = Some(value);
        Ok(())
    }
}
