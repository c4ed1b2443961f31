//! Topic kind for rounds, discussions, and polls.
//!
//! The two topic tracks (Books and Themes) differ in a handful of spots:
//! discussion titles, notification template keys, and which terminal
//! artifact a resolved poll produces. Those differences live in one
//! [`TopicProfile`] table consulted at each transition, instead of being
//! branched on ad hoc throughout the round logic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DomainError, ErrorCode};

/// What kind of proposals a round phase collects and votes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Books,
    Themes,
}

/// The terminal artifact a resolved poll of this topic produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerArtifactKind {
    Book,
    Discussion,
}

/// Per-topic behavior table.
pub struct TopicProfile {
    /// Template key for the "new proposal" notification.
    pub new_post_template: &'static str,
    /// Template key for the "new round" notification.
    pub new_round_template: &'static str,
    /// What a clean win resolves into.
    pub winner_artifact: WinnerArtifactKind,
    discussion_title_prefix: &'static str,
}

impl TopicProfile {
    /// Title for the proposal discussion of a round with this topic.
    pub fn discussion_title(&self, round_title: &str) -> String {
        format!("{} {}", self.discussion_title_prefix, round_title)
    }
}

const BOOKS_PROFILE: TopicProfile = TopicProfile {
    new_post_template: "new-book-proposal",
    new_round_template: "new-book-round",
    winner_artifact: WinnerArtifactKind::Book,
    discussion_title_prefix: "Book proposals:",
};

const THEMES_PROFILE: TopicProfile = TopicProfile {
    new_post_template: "new-theme-proposal",
    new_round_template: "new-theme-round",
    winner_artifact: WinnerArtifactKind::Discussion,
    discussion_title_prefix: "Theme proposals:",
};

impl Topic {
    /// Returns the behavior table for this topic.
    pub fn profile(&self) -> &'static TopicProfile {
        match self {
            Topic::Books => &BOOKS_PROFILE,
            Topic::Themes => &THEMES_PROFILE,
        }
    }

    /// Title for the poll opened when a discussion of this topic closes.
    pub fn poll_title(&self, discussion_title: &str) -> String {
        format!("Vote: {}", discussion_title)
    }

    /// Title for a tiebreaker poll superseding `poll_title`.
    pub fn tiebreaker_title(&self, poll_title: &str) -> String {
        format!("Tiebreaker: {}", poll_title)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Books => write!(f, "books"),
            Topic::Themes => write!(f, "themes"),
        }
    }
}

impl FromStr for Topic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "books" => Ok(Topic::Books),
            "themes" => Ok(Topic::Themes),
            other => Err(DomainError::new(
                ErrorCode::InvalidTopic,
                format!("Invalid topic: {}", other),
            )),
        }
    }
}
