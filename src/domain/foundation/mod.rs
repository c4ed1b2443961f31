//! Shared domain building blocks: identifiers, errors, timestamps, topics.

mod errors;
mod ids;
mod timestamp;
mod topic;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookId, DiscussionId, PollId, PostId, RoundId, UserId};
pub use timestamp::Timestamp;
pub use topic::{Topic, TopicProfile, WinnerArtifactKind};
