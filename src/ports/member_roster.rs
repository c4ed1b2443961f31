//! Member roster port.

use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// Port exposing the club's eligible voters.
///
/// The poll engine compares the already-voted set against this roster to
/// decide when a poll is complete enough to resolve. Membership management
/// itself lives with the identity collaborator, not here.
#[async_trait]
pub trait MemberRoster: Send + Sync {
    /// Current set of members eligible to vote.
    async fn eligible_voters(&self) -> Result<Vec<UserId>, DomainError>;

    /// Count of eligible voters.
    async fn eligible_voter_count(&self) -> Result<usize, DomainError> {
        Ok(self.eligible_voters().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_roster_is_object_safe() {
        fn _accepts_dyn(_roster: &dyn MemberRoster) {}
    }
}
