//! Atomic multi-entity commit port for round transitions.

use crate::domain::book::Book;
use crate::domain::discussion::Discussion;
use crate::domain::foundation::DomainError;
use crate::domain::poll::Poll;
use crate::domain::round::Round;
use async_trait::async_trait;

/// Everything a single round transition writes: the updated round links,
/// the closed/created polls and discussions, and any book produced.
///
/// Entities are upserted by identity.
#[derive(Debug, Clone)]
pub struct RoundTransition {
    pub round: Round,
    pub discussions: Vec<Discussion>,
    pub polls: Vec<Poll>,
    pub books: Vec<Book>,
}

impl RoundTransition {
    pub fn new(round: Round) -> Self {
        Self {
            round,
            discussions: Vec::new(),
            polls: Vec::new(),
            books: Vec::new(),
        }
    }

    pub fn with_discussion(mut self, discussion: Discussion) -> Self {
        self.discussions.push(discussion);
        self
    }

    pub fn with_poll(mut self, poll: Poll) -> Self {
        self.polls.push(poll);
        self
    }

    pub fn with_book(mut self, book: Book) -> Self {
        self.books.push(book);
        self
    }
}

/// Port for committing a round transition as one unit.
///
/// No other operation may observe a half-applied transition: either every
/// entity in the transition is visible, or none is. A failure aborts the
/// whole transition.
#[async_trait]
pub trait TransitionWriter: Send + Sync {
    /// Commit all entities of the transition atomically.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure (nothing is applied)
    async fn commit(&self, transition: RoundTransition) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_writer_is_object_safe() {
        fn _accepts_dyn(_writer: &dyn TransitionWriter) {}
    }
}
