//! Round repository port.

use crate::domain::foundation::{DomainError, RoundId};
use crate::domain::round::Round;
use async_trait::async_trait;

/// Repository port for Round aggregate persistence.
///
/// Rounds are never deleted; there is deliberately no delete operation.
#[async_trait]
pub trait RoundRepository: Send + Sync {
    /// Save a new round.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, round: &Round) -> Result<(), DomainError>;

    /// Update an existing round.
    ///
    /// # Errors
    ///
    /// - `RoundNotFound` if the round doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, round: &Round) -> Result<(), DomainError>;

    /// Find a round by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: RoundId) -> Result<Option<Round>, DomainError>;

    /// All rounds, newest first.
    async fn find_all(&self) -> Result<Vec<Round>, DomainError>;
}
