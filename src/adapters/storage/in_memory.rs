//! In-memory entity store.
//!
//! Backs all repository ports plus the transition writer with a single
//! `RwLock`-guarded map set, so a multi-entity commit is applied under one
//! write lock and is observed all-or-nothing. Suitable for a single-process
//! deployment at club scale and for tests; a transactional database adapter
//! would implement the same ports for anything larger.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::book::Book;
use crate::domain::discussion::Discussion;
use crate::domain::foundation::{
    BookId, DiscussionId, DomainError, ErrorCode, PollId, RoundId, UserId,
};
use crate::domain::poll::Poll;
use crate::domain::round::Round;
use crate::ports::{
    BookRepository, DiscussionRepository, MemberRoster, PollRepository, RoundRepository,
    RoundTransition, TransitionWriter,
};

#[derive(Default)]
struct StoreInner {
    rounds: HashMap<RoundId, Round>,
    discussions: HashMap<DiscussionId, Discussion>,
    polls: HashMap<PollId, Poll>,
    books: HashMap<BookId, Book>,
}

/// In-memory implementation of every entity store port.
#[derive(Default)]
pub struct InMemoryClubStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreInner> {
        self.inner.read().expect("InMemoryClubStore: lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner> {
        self.inner
            .write()
            .expect("InMemoryClubStore: lock poisoned")
    }
}

#[async_trait]
impl RoundRepository for InMemoryClubStore {
    async fn save(&self, round: &Round) -> Result<(), DomainError> {
        self.write().rounds.insert(round.id(), round.clone());
        Ok(())
    }

    async fn update(&self, round: &Round) -> Result<(), DomainError> {
        let mut inner = self.write();
        if !inner.rounds.contains_key(&round.id()) {
            return Err(DomainError::new(
                ErrorCode::RoundNotFound,
                format!("Round not found: {}", round.id()),
            ));
        }
        inner.rounds.insert(round.id(), round.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RoundId) -> Result<Option<Round>, DomainError> {
        Ok(self.read().rounds.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Round>, DomainError> {
        let mut rounds: Vec<Round> = self.read().rounds.values().cloned().collect();
        rounds.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rounds)
    }
}

#[async_trait]
impl DiscussionRepository for InMemoryClubStore {
    async fn save(&self, discussion: &Discussion) -> Result<(), DomainError> {
        self.write()
            .discussions
            .insert(discussion.id(), discussion.clone());
        Ok(())
    }

    async fn update(&self, discussion: &Discussion) -> Result<(), DomainError> {
        let mut inner = self.write();
        if !inner.discussions.contains_key(&discussion.id()) {
            return Err(DomainError::new(
                ErrorCode::DiscussionNotFound,
                format!("Discussion not found: {}", discussion.id()),
            ));
        }
        inner.discussions.insert(discussion.id(), discussion.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DiscussionId) -> Result<Option<Discussion>, DomainError> {
        Ok(self.read().discussions.get(&id).cloned())
    }
}

#[async_trait]
impl PollRepository for InMemoryClubStore {
    async fn save(&self, poll: &Poll) -> Result<(), DomainError> {
        self.write().polls.insert(poll.id(), poll.clone());
        Ok(())
    }

    async fn update(&self, poll: &Poll) -> Result<(), DomainError> {
        let mut inner = self.write();
        if !inner.polls.contains_key(&poll.id()) {
            return Err(DomainError::new(
                ErrorCode::PollNotFound,
                format!("Poll not found: {}", poll.id()),
            ));
        }
        inner.polls.insert(poll.id(), poll.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PollId) -> Result<Option<Poll>, DomainError> {
        Ok(self.read().polls.get(&id).cloned())
    }
}

#[async_trait]
impl BookRepository for InMemoryClubStore {
    async fn save(&self, book: &Book) -> Result<(), DomainError> {
        self.write().books.insert(book.id(), book.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, DomainError> {
        Ok(self.read().books.get(&id).cloned())
    }
}

#[async_trait]
impl TransitionWriter for InMemoryClubStore {
    async fn commit(&self, transition: RoundTransition) -> Result<(), DomainError> {
        // One write lock for the whole transition: readers see either all
        // of it or none of it.
        let mut inner = self.write();
        inner
            .rounds
            .insert(transition.round.id(), transition.round);
        for discussion in transition.discussions {
            inner.discussions.insert(discussion.id(), discussion);
        }
        for poll in transition.polls {
            inner.polls.insert(poll.id(), poll);
        }
        for book in transition.books {
            inner.books.insert(book.id(), book);
        }
        Ok(())
    }
}

/// In-memory member roster with a fixed member set.
pub struct InMemoryRoster {
    members: RwLock<Vec<UserId>>,
}

impl InMemoryRoster {
    pub fn new(members: Vec<UserId>) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }

    /// Adds a member (for tests and demo wiring).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn add_member(&self, member: UserId) {
        self.members
            .write()
            .expect("InMemoryRoster: lock poisoned")
            .push(member);
    }
}

#[async_trait]
impl MemberRoster for InMemoryRoster {
    async fn eligible_voters(&self) -> Result<Vec<UserId>, DomainError> {
        Ok(self
            .members
            .read()
            .expect("InMemoryRoster: lock poisoned")
            .clone())
    }
}
