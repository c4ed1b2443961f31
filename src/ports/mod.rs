//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! round/poll core and the outside world. Adapters implement these ports.
//!
//! ## Entity store ports
//!
//! - `RoundRepository`, `DiscussionRepository`, `PollRepository`,
//!   `BookRepository` - per-aggregate persistence
//! - `TransitionWriter` - atomic multi-entity commit for round transitions
//!
//! ## Collaborator ports
//!
//! - `MemberRoster` - the eligible-voter set used for poll completion
//! - `NotificationSink` - best-effort outbound notifications

mod book_repository;
mod discussion_repository;
mod member_roster;
mod notification_sink;
mod poll_repository;
mod round_repository;
mod transition_writer;

pub use book_repository::BookRepository;
pub use discussion_repository::DiscussionRepository;
pub use member_roster::MemberRoster;
pub use notification_sink::{Notification, NotificationSink, AUDIENCE_BASIC_EVENTS};
pub use poll_repository::PollRepository;
pub use round_repository::RoundRepository;
pub use transition_writer::{RoundTransition, TransitionWriter};
