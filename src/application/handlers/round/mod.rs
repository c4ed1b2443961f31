//! Round lifecycle handlers.

mod close_discussion;
mod close_poll;
mod get_round;
mod list_rounds;
mod start_round;

pub use close_discussion::{CloseDiscussionCommand, CloseDiscussionHandler, CloseDiscussionResult};
pub use close_poll::{ClosePollCommand, ClosePollHandler, RoundArtifact, RoundUpdate};
pub use get_round::GetRoundHandler;
pub use list_rounds::ListRoundsHandler;
pub use start_round::{StartRoundCommand, StartRoundHandler, StartRoundResult};
