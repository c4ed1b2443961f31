//! Discussion repository port.

use crate::domain::discussion::Discussion;
use crate::domain::foundation::{DiscussionId, DomainError};
use async_trait::async_trait;

/// Repository port for Discussion aggregate persistence.
///
/// A discussion is stored with its posts; loading one always yields the
/// full ordered post list.
#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    /// Save a new discussion.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, discussion: &Discussion) -> Result<(), DomainError>;

    /// Update an existing discussion (post appended or closed flag set).
    ///
    /// The update is applied as one write: callers rely on a post append
    /// never being observable without its parent discussion state.
    ///
    /// # Errors
    ///
    /// - `DiscussionNotFound` if the discussion doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, discussion: &Discussion) -> Result<(), DomainError>;

    /// Find a discussion by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: DiscussionId) -> Result<Option<Discussion>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discussion_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DiscussionRepository) {}
    }
}
