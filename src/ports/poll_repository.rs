//! Poll repository port.

use crate::domain::foundation::{DomainError, PollId};
use crate::domain::poll::Poll;
use async_trait::async_trait;

/// Repository port for Poll aggregate persistence.
///
/// A poll is stored with its option snapshot and votes. Implementations
/// must apply `update` atomically per poll so that a vote upsert for one
/// (poll, owner) key can never interleave with another at the storage
/// level.
#[async_trait]
pub trait PollRepository: Send + Sync {
    /// Save a new poll.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, poll: &Poll) -> Result<(), DomainError>;

    /// Update an existing poll.
    ///
    /// # Errors
    ///
    /// - `PollNotFound` if the poll doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, poll: &Poll) -> Result<(), DomainError>;

    /// Find a poll by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: PollId) -> Result<Option<Poll>, DomainError>;
}
