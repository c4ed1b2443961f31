//! ListRoundsHandler - lists all rounds, newest first.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::round::Round;
use crate::ports::RoundRepository;

/// Query handler for the round history.
pub struct ListRoundsHandler {
    rounds: Arc<dyn RoundRepository>,
}

impl ListRoundsHandler {
    pub fn new(rounds: Arc<dyn RoundRepository>) -> Self {
        Self { rounds }
    }

    pub async fn handle(&self) -> Result<Vec<Round>, DomainError> {
        self.rounds.find_all().await
    }
}
