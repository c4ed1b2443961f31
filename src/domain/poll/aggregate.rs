//! Poll aggregate entity.
//!
//! A poll owns its option snapshot and its votes. Options are copies of the
//! posts taken when the source discussion closed (or the tied subset of a
//! previous poll for a tiebreaker), so later changes elsewhere can never
//! alter a ballot. Votes are keyed by owner: one ballot per member, a later
//! cast replaces the earlier one.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::discussion::{Discussion, Post};
use crate::domain::foundation::{
    BookId, DiscussionId, DomainError, ErrorCode, PollId, PostId, RoundId, Timestamp, Topic,
    UserId,
};

use super::WinnerSet;

/// The artifact a resolved poll chains into. Set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Followup {
    Book(BookId),
    Discussion(DiscussionId),
    Poll(PollId),
}

/// One member's ballot: an ordered, non-empty subset of the poll's options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub owner: UserId,
    pub post_ids: Vec<PostId>,
    pub cast_at: Timestamp,
}

/// Vote count for a single option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionTally {
    pub post_id: PostId,
    pub votes: u32,
}

/// On-demand tally over all ballots, in poll option order.
///
/// Ballots may select several options, so counts are not mutually
/// exclusive sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub counts: Vec<OptionTally>,
    pub voters: BTreeSet<UserId>,
}

impl Tally {
    /// True when no ballots have been cast.
    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    /// Number of distinct members who have voted.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }
}

/// Poll aggregate - voting over a frozen option set.
///
/// # Invariants
///
/// - The option set is immutable after creation
/// - At most one vote per owner; re-casting replaces
/// - Closes exactly once; votes are rejected once closed
/// - The followup reference, once set, is never changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    id: PollId,
    discussion_id: DiscussionId,
    round_id: RoundId,
    topic: Topic,
    title: String,
    options: Vec<Post>,
    closed: bool,
    is_tiebreaker: bool,
    previous_poll_id: Option<PollId>,
    followup: Option<Followup>,
    votes: BTreeMap<UserId, Vote>,
    owner: UserId,
    created_at: Timestamp,
}

impl Poll {
    /// Snapshot a closed discussion's posts into a new open poll.
    ///
    /// # Errors
    ///
    /// - `EmptyProposalSet` if the discussion has no posts to snapshot
    pub fn from_discussion(discussion: &Discussion, owner: UserId) -> Result<Self, DomainError> {
        if discussion.posts().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyProposalSet,
                "Cannot open a poll over zero proposals",
            ));
        }
        Ok(Self {
            id: PollId::new(),
            discussion_id: discussion.id(),
            round_id: discussion.round_id(),
            topic: discussion.topic(),
            title: discussion.topic().poll_title(discussion.title()),
            options: discussion.posts().to_vec(),
            closed: false,
            is_tiebreaker: false,
            previous_poll_id: None,
            followup: None,
            votes: BTreeMap::new(),
            owner,
            created_at: Timestamp::now(),
        })
    }

    /// Open a tiebreaker poll over exactly the tied options of this poll,
    /// preserving their original order.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the winner set names options this poll lacks
    pub fn tiebreaker(&self, winners: &WinnerSet, owner: UserId) -> Result<Self, DomainError> {
        let tied: Vec<Post> = self
            .options
            .iter()
            .filter(|post| winners.contains(post.id))
            .cloned()
            .collect();
        if tied.len() != winners.len() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Winner set does not match poll options",
            ));
        }
        Ok(Self {
            id: PollId::new(),
            discussion_id: self.discussion_id,
            round_id: self.round_id,
            topic: self.topic,
            title: self.topic.tiebreaker_title(&self.title),
            options: tied,
            closed: false,
            is_tiebreaker: true,
            previous_poll_id: Some(self.id),
            followup: None,
            votes: BTreeMap::new(),
            owner,
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> PollId {
        self.id
    }

    pub fn discussion_id(&self) -> DiscussionId {
        self.discussion_id
    }

    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The frozen option snapshot, in discussion post order.
    pub fn options(&self) -> &[Post] {
        &self.options
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_tiebreaker(&self) -> bool {
        self.is_tiebreaker
    }

    pub fn previous_poll_id(&self) -> Option<PollId> {
        self.previous_poll_id
    }

    pub fn followup(&self) -> Option<Followup> {
        self.followup
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the option post with the given id, if present.
    pub fn option(&self, post_id: PostId) -> Option<&Post> {
        self.options.iter().find(|post| post.id == post_id)
    }

    /// Returns the stored ballot of one member, if any.
    pub fn vote_of(&self, owner: &UserId) -> Option<&Vote> {
        self.votes.get(owner)
    }

    /// Upsert one member's ballot.
    ///
    /// Re-casting with identical input leaves the stored choice identical;
    /// re-casting with a different choice replaces, never duplicates.
    ///
    /// # Errors
    ///
    /// - `PollClosed` if the poll has been closed
    /// - `InvalidChoice` if the choice is empty or not a subset of the options
    pub fn cast_vote(&mut self, owner: UserId, post_ids: Vec<PostId>) -> Result<(), DomainError> {
        if self.closed {
            return Err(DomainError::new(ErrorCode::PollClosed, "Poll is closed")
                .with_detail("poll_id", self.id.to_string()));
        }
        if post_ids.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidChoice,
                "A vote must select at least one option",
            ));
        }
        // Duplicate selections collapse; order of first occurrence is kept.
        let mut chosen: Vec<PostId> = Vec::with_capacity(post_ids.len());
        for post_id in post_ids {
            if self.option(post_id).is_none() {
                return Err(DomainError::new(
                    ErrorCode::InvalidChoice,
                    "Vote selects an option not on this poll",
                )
                .with_detail("post_id", post_id.to_string()));
            }
            if !chosen.contains(&post_id) {
                chosen.push(post_id);
            }
        }

        self.votes.insert(
            owner.clone(),
            Vote {
                owner,
                post_ids: chosen,
                cast_at: Timestamp::now(),
            },
        );
        Ok(())
    }

    /// Recompute the tally from stored ballots.
    ///
    /// O(votes x options-per-vote); recomputed on demand rather than
    /// incrementally maintained.
    pub fn tally(&self) -> Tally {
        let counts = self
            .options
            .iter()
            .map(|post| OptionTally {
                post_id: post.id,
                votes: self
                    .votes
                    .values()
                    .filter(|vote| vote.post_ids.contains(&post.id))
                    .count() as u32,
            })
            .collect();
        Tally {
            counts,
            voters: self.votes.keys().cloned().collect(),
        }
    }

    /// Mark the poll closed. One-way, no intermediate states.
    ///
    /// # Errors
    ///
    /// - `AlreadyClosed` if the poll was closed before
    pub fn close(&mut self) -> Result<(), DomainError> {
        if self.closed {
            return Err(
                DomainError::new(ErrorCode::AlreadyClosed, "Poll is already closed")
                    .with_detail("poll_id", self.id.to_string()),
            );
        }
        self.closed = true;
        Ok(())
    }

    /// Record what this poll resolved into. Write-once.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if a followup is already recorded
    pub fn set_followup(&mut self, followup: Followup) -> Result<(), DomainError> {
        if self.followup.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Poll followup reference is already set",
            ));
        }
        self.followup = Some(followup);
        Ok(())
    }
}
