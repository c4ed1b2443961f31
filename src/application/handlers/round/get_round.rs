//! GetRoundHandler - loads one round by id.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, RoundId};
use crate::domain::round::Round;
use crate::ports::RoundRepository;

/// Query handler for a single round.
pub struct GetRoundHandler {
    rounds: Arc<dyn RoundRepository>,
}

impl GetRoundHandler {
    pub fn new(rounds: Arc<dyn RoundRepository>) -> Self {
        Self { rounds }
    }

    pub async fn handle(&self, round_id: RoundId) -> Result<Round, DomainError> {
        self.rounds.find_by_id(round_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::RoundNotFound,
                format!("Round not found: {}", round_id),
            )
        })
    }
}
