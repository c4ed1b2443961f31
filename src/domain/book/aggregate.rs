//! Book entity.

use serde::{Deserialize, Serialize};

use crate::domain::discussion::Post;
use crate::domain::foundation::{BookId, RoundId, Timestamp, UserId};

/// The book a round resolved to. Immutable once created.
///
/// Carries a copy of the winning post so the record stays intact even
/// though posts themselves are out of scope for later mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    post: Post,
    round_id: RoundId,
    owner: UserId,
    created_at: Timestamp,
}

impl Book {
    /// Create a book from the winning post of a resolved poll.
    pub fn from_winning_post(post: Post, round_id: RoundId, owner: UserId) -> Self {
        Self {
            id: BookId::new(),
            post,
            round_id,
            owner,
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    /// The winning post this book was created from.
    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
