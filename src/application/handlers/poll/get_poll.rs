//! GetPollHandler - loads one poll by id.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, PollId};
use crate::domain::poll::Poll;
use crate::ports::PollRepository;

/// Query handler for a single poll with its options and votes.
pub struct GetPollHandler {
    polls: Arc<dyn PollRepository>,
}

impl GetPollHandler {
    pub fn new(polls: Arc<dyn PollRepository>) -> Self {
        Self { polls }
    }

    pub async fn handle(&self, poll_id: PollId) -> Result<Poll, DomainError> {
        self.polls.find_by_id(poll_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::PollNotFound,
                format!("Poll not found: {}", poll_id),
            )
        })
    }
}
