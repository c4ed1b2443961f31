//! StartRoundHandler - opens a new round with its first proposal discussion.

use std::sync::Arc;

use crate::application::Newsletter;
use crate::domain::discussion::Discussion;
use crate::domain::foundation::{DomainError, Topic, UserId};
use crate::domain::round::Round;
use crate::ports::{RoundTransition, TransitionWriter};

/// Command to start a new round.
#[derive(Debug, Clone)]
pub struct StartRoundCommand {
    pub topic: Topic,
    pub title: String,
    pub description: String,
    pub owner: UserId,
}

/// Result of a successful round start.
#[derive(Debug, Clone)]
pub struct StartRoundResult {
    pub round: Round,
    pub discussion: Discussion,
}

/// Handler for starting rounds.
///
/// The new round and its first discussion commit as one transition, so no
/// reader can observe a round whose discussion link points nowhere.
pub struct StartRoundHandler {
    writer: Arc<dyn TransitionWriter>,
    newsletter: Arc<Newsletter>,
}

impl StartRoundHandler {
    pub fn new(writer: Arc<dyn TransitionWriter>, newsletter: Arc<Newsletter>) -> Self {
        Self { writer, newsletter }
    }

    pub async fn handle(&self, cmd: StartRoundCommand) -> Result<StartRoundResult, DomainError> {
        let mut round = Round::new(cmd.topic, cmd.title, cmd.owner.clone())?;
        let discussion = Discussion::new(
            round.id(),
            cmd.topic,
            cmd.topic.profile().discussion_title(round.title()),
            cmd.description,
            cmd.owner,
        )?;
        round.link_discussion(cmd.topic, discussion.id())?;

        self.writer
            .commit(RoundTransition::new(round.clone()).with_discussion(discussion.clone()))
            .await?;

        self.newsletter.round_started(&round, &discussion).await;

        Ok(StartRoundResult { round, discussion })
    }
}
