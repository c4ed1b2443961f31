//! CastVoteHandler - records a ballot and completes the poll when the
//! whole roster has voted.

use std::sync::Arc;

use crate::application::handlers::round::{ClosePollCommand, ClosePollHandler, RoundUpdate};
use crate::application::RoundLocks;
use crate::domain::foundation::{DomainError, ErrorCode, PollId, PostId, UserId};
use crate::domain::poll::{Poll, Tally};
use crate::ports::{MemberRoster, PollRepository};

/// Command to cast or replace one member's ballot.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub poll_id: PollId,
    pub voter: UserId,
    pub post_ids: Vec<PostId>,
}

/// The recorded ballot and the tally it produced.
#[derive(Debug, Clone)]
pub struct VoteCast {
    pub poll_id: PollId,
    pub tally: Tally,
}

/// Outcome of a cast: either the vote was recorded and the poll stays
/// open, or this was the last outstanding ballot and the round advanced.
#[derive(Debug, Clone)]
pub enum CastVoteOutcome {
    Recorded(VoteCast),
    RoundAdvanced(Box<RoundUpdate>),
}

/// Handler for casting votes.
///
/// The upsert runs under the round lock so concurrent ballots serialize
/// instead of overwriting each other through stale aggregate copies. The
/// lock is released before delegating to the close handler, which takes
/// it again itself.
pub struct CastVoteHandler {
    polls: Arc<dyn PollRepository>,
    roster: Arc<dyn MemberRoster>,
    locks: Arc<RoundLocks>,
    close_poll: Arc<ClosePollHandler>,
}

impl CastVoteHandler {
    pub fn new(
        polls: Arc<dyn PollRepository>,
        roster: Arc<dyn MemberRoster>,
        locks: Arc<RoundLocks>,
        close_poll: Arc<ClosePollHandler>,
    ) -> Self {
        Self {
            polls,
            roster,
            locks,
            close_poll,
        }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<CastVoteOutcome, DomainError> {
        let poll = self.load(cmd.poll_id).await?;
        let lock = self.locks.lock_for(poll.round_id());

        let (tally, round_owner) = {
            let _guard = lock.lock().await;
            let mut poll = self.load(cmd.poll_id).await?;
            poll.cast_vote(cmd.voter, cmd.post_ids)?;
            self.polls.update(&poll).await?;
            (poll.tally(), poll.owner().clone())
        };

        let eligible = self.roster.eligible_voter_count().await?;
        if eligible > 0 && tally.voter_count() >= eligible {
            // Every member has voted; resolve on the round owner's behalf.
            match self
                .close_poll
                .handle(ClosePollCommand {
                    poll_id: cmd.poll_id,
                    actor: round_owner,
                })
                .await
            {
                Ok(update) => return Ok(CastVoteOutcome::RoundAdvanced(Box::new(update))),
                // A concurrent completion won the close; the ballot above
                // still made it in before the poll closed.
                Err(err) if err.code == ErrorCode::AlreadyClosed => {}
                Err(err) => return Err(err),
            }
        }

        Ok(CastVoteOutcome::Recorded(VoteCast {
            poll_id: cmd.poll_id,
            tally,
        }))
    }

    async fn load(&self, id: PollId) -> Result<Poll, DomainError> {
        self.polls.find_by_id(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::PollNotFound, format!("Poll not found: {}", id))
        })
    }
}
