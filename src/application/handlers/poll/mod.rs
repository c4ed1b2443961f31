//! Poll handlers.

mod cast_vote;
mod get_poll;

pub use cast_vote::{CastVoteCommand, CastVoteHandler, CastVoteOutcome, VoteCast};
pub use get_poll::GetPollHandler;
