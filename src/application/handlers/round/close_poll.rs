//! ClosePollHandler - resolves a poll and advances the round.
//!
//! A clean win (or any tiebreaker result) produces the topic's terminal
//! artifact: a book for the book track, the follow-up book discussion for
//! the theme track. A tie on a first poll produces one tiebreaker poll
//! over exactly the tied options; a tiebreaker never chains into another.

use std::sync::Arc;

use crate::application::{Newsletter, RoundLocks};
use crate::domain::book::Book;
use crate::domain::discussion::Discussion;
use crate::domain::foundation::{
    DomainError, ErrorCode, PollId, Topic, UserId, WinnerArtifactKind,
};
use crate::domain::poll::{resolve, Followup, Poll};
use crate::domain::round::Round;
use crate::ports::{PollRepository, RoundRepository, RoundTransition, TransitionWriter};

/// Command to close a poll and resolve its outcome.
#[derive(Debug, Clone)]
pub struct ClosePollCommand {
    pub poll_id: PollId,
    pub actor: UserId,
}

/// What the resolved poll produced.
#[derive(Debug, Clone)]
pub enum RoundArtifact {
    Book(Book),
    Discussion(Discussion),
    Tiebreaker(Poll),
}

/// The committed state after a poll close: the updated round, the closed
/// poll, and the artifact it chained into.
#[derive(Debug, Clone)]
pub struct RoundUpdate {
    pub round: Round,
    pub poll: Poll,
    pub artifact: RoundArtifact,
}

/// Handler for closing polls.
///
/// The whole read-tally, decide, commit section runs under the round lock,
/// and the poll is reloaded once the lock is held. Of two simultaneous
/// closes exactly one commits; the loser fails with `AlreadyClosed`.
pub struct ClosePollHandler {
    rounds: Arc<dyn RoundRepository>,
    polls: Arc<dyn PollRepository>,
    writer: Arc<dyn TransitionWriter>,
    locks: Arc<RoundLocks>,
    newsletter: Arc<Newsletter>,
}

impl ClosePollHandler {
    pub fn new(
        rounds: Arc<dyn RoundRepository>,
        polls: Arc<dyn PollRepository>,
        writer: Arc<dyn TransitionWriter>,
        locks: Arc<RoundLocks>,
        newsletter: Arc<Newsletter>,
    ) -> Self {
        Self {
            rounds,
            polls,
            writer,
            locks,
            newsletter,
        }
    }

    pub async fn handle(&self, cmd: ClosePollCommand) -> Result<RoundUpdate, DomainError> {
        let poll = self.load_poll(cmd.poll_id).await?;
        let lock = self.locks.lock_for(poll.round_id());
        let _guard = lock.lock().await;

        // Reload under the lock; stale state must not drive the decision.
        let mut poll = self.load_poll(cmd.poll_id).await?;
        let mut round = self
            .rounds
            .find_by_id(poll.round_id())
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::RoundNotFound,
                    format!("Round not found: {}", poll.round_id()),
                )
            })?;
        if cmd.actor != *round.owner() {
            return Err(DomainError::new(
                ErrorCode::PermissionDenied,
                "Only the round owner may close a poll",
            ));
        }

        let tally = poll.tally();
        let winners = resolve(&tally)?;
        poll.close()?;

        let artifact = if winners.is_decisive() || poll.is_tiebreaker() {
            // A still-tied tiebreaker accepts the deterministic pick rather
            // than chaining another tiebreaker.
            let winning = poll.option(winners.pick()).cloned().ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InternalError,
                    "Winning option missing from poll snapshot",
                )
            })?;
            match poll.topic().profile().winner_artifact {
                WinnerArtifactKind::Book => {
                    let book = Book::from_winning_post(winning, round.id(), cmd.actor.clone());
                    round.link_book(book.id())?;
                    poll.set_followup(Followup::Book(book.id()))?;
                    RoundArtifact::Book(book)
                }
                WinnerArtifactKind::Discussion => {
                    let discussion = Discussion::new(
                        round.id(),
                        Topic::Books,
                        Topic::Books.profile().discussion_title(round.title()),
                        format!("**{}** - {}", winning.title, winning.text),
                        cmd.actor.clone(),
                    )?;
                    round.link_discussion(Topic::Books, discussion.id())?;
                    poll.set_followup(Followup::Discussion(discussion.id()))?;
                    RoundArtifact::Discussion(discussion)
                }
            }
        } else {
            let tiebreaker = poll.tiebreaker(&winners, cmd.actor.clone())?;
            round.link_tiebreaker_poll(poll.topic(), tiebreaker.id())?;
            poll.set_followup(Followup::Poll(tiebreaker.id()))?;
            RoundArtifact::Tiebreaker(tiebreaker)
        };

        let mut transition = RoundTransition::new(round.clone()).with_poll(poll.clone());
        transition = match &artifact {
            RoundArtifact::Book(book) => transition.with_book(book.clone()),
            RoundArtifact::Discussion(discussion) => {
                transition.with_discussion(discussion.clone())
            }
            RoundArtifact::Tiebreaker(tiebreaker) => transition.with_poll(tiebreaker.clone()),
        };
        self.writer.commit(transition).await?;

        match &artifact {
            RoundArtifact::Book(book) => self.newsletter.book_chosen(book).await,
            RoundArtifact::Discussion(discussion) => {
                self.newsletter.discussion_opened(discussion).await
            }
            RoundArtifact::Tiebreaker(tiebreaker) => self.newsletter.poll_opened(tiebreaker).await,
        }

        Ok(RoundUpdate {
            round,
            poll,
            artifact,
        })
    }

    async fn load_poll(&self, id: PollId) -> Result<Poll, DomainError> {
        self.polls.find_by_id(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::PollNotFound, format!("Poll not found: {}", id))
        })
    }
}
