//! HTTP DTOs for the club API.
//!
//! These types define the JSON request/response structure and are the
//! boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::application::handlers::poll::{CastVoteOutcome, VoteCast};
use crate::application::handlers::round::{
    CloseDiscussionResult, RoundArtifact, RoundUpdate, StartRoundResult,
};
use crate::domain::book::Book;
use crate::domain::discussion::{Discussion, Post, PostDraft};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::poll::{Followup, Poll, Tally};
use crate::domain::round::Round;

// ── Request DTOs ────────────────────────────────────────────────────

/// Request to start a new round.
#[derive(Debug, Clone, Deserialize)]
pub struct StartRoundRequest {
    /// Topic track: "books" or "themes".
    pub topic: String,
    pub title: String,
    /// Seeds the first discussion's description.
    #[serde(default)]
    pub description: String,
}

/// Request to add a proposal post.
#[derive(Debug, Clone, Deserialize)]
pub struct AddPostRequest {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
    pub page_count: Option<u32>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

impl From<AddPostRequest> for PostDraft {
    fn from(req: AddPostRequest) -> Self {
        PostDraft {
            title: req.title,
            author: req.author,
            text: req.text,
            page_count: req.page_count,
            url: req.url,
            image_url: req.image_url,
        }
    }
}

/// Request to cast or replace a ballot.
#[derive(Debug, Clone, Deserialize)]
pub struct CastVoteRequest {
    /// Selected option ids.
    pub post_ids: Vec<String>,
}

// ── Response DTOs ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RoundResponse {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub theme_discussion_id: Option<String>,
    pub theme_poll_id: Option<String>,
    pub theme_tiebreaker_poll_id: Option<String>,
    pub book_discussion_id: Option<String>,
    pub book_poll_id: Option<String>,
    pub book_tiebreaker_poll_id: Option<String>,
    pub book_id: Option<String>,
    pub owner: String,
    pub created_at: String,
}

impl From<&Round> for RoundResponse {
    fn from(round: &Round) -> Self {
        Self {
            id: round.id().to_string(),
            title: round.title().to_string(),
            topic: round.topic().to_string(),
            theme_discussion_id: round.theme_discussion_id().map(|id| id.to_string()),
            theme_poll_id: round.theme_poll_id().map(|id| id.to_string()),
            theme_tiebreaker_poll_id: round.theme_tiebreaker_poll_id().map(|id| id.to_string()),
            book_discussion_id: round.book_discussion_id().map(|id| id.to_string()),
            book_poll_id: round.book_poll_id().map(|id| id.to_string()),
            book_tiebreaker_poll_id: round.book_tiebreaker_poll_id().map(|id| id.to_string()),
            book_id: round.book_id().map(|id| id.to_string()),
            owner: round.owner().to_string(),
            created_at: round.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub text: String,
    pub page_count: Option<u32>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub owner: String,
    pub created_at: String,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.clone(),
            text: post.text.clone(),
            page_count: post.page_count,
            url: post.url.clone(),
            image_url: post.image_url.clone(),
            owner: post.owner.to_string(),
            created_at: post.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscussionResponse {
    pub id: String,
    pub round_id: String,
    pub topic: String,
    pub title: String,
    pub description: String,
    pub closed: bool,
    pub posts: Vec<PostResponse>,
    pub owner: String,
    pub created_at: String,
}

impl From<&Discussion> for DiscussionResponse {
    fn from(discussion: &Discussion) -> Self {
        Self {
            id: discussion.id().to_string(),
            round_id: discussion.round_id().to_string(),
            topic: discussion.topic().to_string(),
            title: discussion.title().to_string(),
            description: discussion.description().to_string(),
            closed: discussion.is_closed(),
            posts: discussion.posts().iter().map(PostResponse::from).collect(),
            owner: discussion.owner().to_string(),
            created_at: discussion.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionTallyResponse {
    pub post_id: String,
    pub votes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TallyResponse {
    pub counts: Vec<OptionTallyResponse>,
    pub voters: Vec<String>,
    pub voter_count: usize,
}

impl From<&Tally> for TallyResponse {
    fn from(tally: &Tally) -> Self {
        Self {
            counts: tally
                .counts
                .iter()
                .map(|count| OptionTallyResponse {
                    post_id: count.post_id.to_string(),
                    votes: count.votes,
                })
                .collect(),
            voters: tally.voters.iter().map(|v| v.to_string()).collect(),
            voter_count: tally.voter_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowupResponse {
    pub kind: String,
    pub id: String,
}

impl From<Followup> for FollowupResponse {
    fn from(followup: Followup) -> Self {
        match followup {
            Followup::Book(id) => Self {
                kind: "book".to_string(),
                id: id.to_string(),
            },
            Followup::Discussion(id) => Self {
                kind: "discussion".to_string(),
                id: id.to_string(),
            },
            Followup::Poll(id) => Self {
                kind: "poll".to_string(),
                id: id.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PollResponse {
    pub id: String,
    pub discussion_id: String,
    pub round_id: String,
    pub topic: String,
    pub title: String,
    pub options: Vec<PostResponse>,
    pub closed: bool,
    pub is_tiebreaker: bool,
    pub previous_poll_id: Option<String>,
    pub followup: Option<FollowupResponse>,
    pub tally: TallyResponse,
    /// The requesting member's stored ballot, when viewed by a member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_vote: Option<Vec<String>>,
    pub owner: String,
    pub created_at: String,
}

impl PollResponse {
    /// Poll view for one member, including their own stored ballot.
    pub fn for_member(poll: &Poll, member: &UserId) -> Self {
        let mut response = Self::from(poll);
        response.own_vote = poll
            .vote_of(member)
            .map(|vote| vote.post_ids.iter().map(|id| id.to_string()).collect());
        response
    }
}

impl From<&Poll> for PollResponse {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id().to_string(),
            discussion_id: poll.discussion_id().to_string(),
            round_id: poll.round_id().to_string(),
            topic: poll.topic().to_string(),
            title: poll.title().to_string(),
            options: poll.options().iter().map(PostResponse::from).collect(),
            closed: poll.is_closed(),
            is_tiebreaker: poll.is_tiebreaker(),
            previous_poll_id: poll.previous_poll_id().map(|id| id.to_string()),
            followup: poll.followup().map(FollowupResponse::from),
            tally: TallyResponse::from(&poll.tally()),
            own_vote: None,
            owner: poll.owner().to_string(),
            created_at: poll.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub round_id: String,
    pub post: PostResponse,
    pub owner: String,
    pub created_at: String,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id().to_string(),
            round_id: book.round_id().to_string(),
            post: PostResponse::from(book.post()),
            owner: book.owner().to_string(),
            created_at: book.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactResponse {
    Book { book: BookResponse },
    Discussion { discussion: DiscussionResponse },
    Tiebreaker { poll: PollResponse },
}

impl From<&RoundArtifact> for ArtifactResponse {
    fn from(artifact: &RoundArtifact) -> Self {
        match artifact {
            RoundArtifact::Book(book) => ArtifactResponse::Book {
                book: BookResponse::from(book),
            },
            RoundArtifact::Discussion(discussion) => ArtifactResponse::Discussion {
                discussion: DiscussionResponse::from(discussion),
            },
            RoundArtifact::Tiebreaker(poll) => ArtifactResponse::Tiebreaker {
                poll: PollResponse::from(poll),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundUpdateResponse {
    pub round: RoundResponse,
    pub poll: PollResponse,
    pub artifact: ArtifactResponse,
}

impl From<&RoundUpdate> for RoundUpdateResponse {
    fn from(update: &RoundUpdate) -> Self {
        Self {
            round: RoundResponse::from(&update.round),
            poll: PollResponse::from(&update.poll),
            artifact: ArtifactResponse::from(&update.artifact),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartRoundResponse {
    pub round: RoundResponse,
    pub discussion: DiscussionResponse,
}

impl From<&StartRoundResult> for StartRoundResponse {
    fn from(result: &StartRoundResult) -> Self {
        Self {
            round: RoundResponse::from(&result.round),
            discussion: DiscussionResponse::from(&result.discussion),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CloseDiscussionResponse {
    pub round: RoundResponse,
    pub discussion: DiscussionResponse,
    pub poll: PollResponse,
}

impl From<&CloseDiscussionResult> for CloseDiscussionResponse {
    fn from(result: &CloseDiscussionResult) -> Self {
        Self {
            round: RoundResponse::from(&result.round),
            discussion: DiscussionResponse::from(&result.discussion),
            poll: PollResponse::from(&result.poll),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CastVoteResponse {
    Recorded {
        poll_id: String,
        tally: TallyResponse,
    },
    RoundAdvanced {
        update: RoundUpdateResponse,
    },
}

impl From<&CastVoteOutcome> for CastVoteResponse {
    fn from(outcome: &CastVoteOutcome) -> Self {
        match outcome {
            CastVoteOutcome::Recorded(VoteCast { poll_id, tally }) => CastVoteResponse::Recorded {
                poll_id: poll_id.to_string(),
                tally: TallyResponse::from(tally),
            },
            CastVoteOutcome::RoundAdvanced(update) => CastVoteResponse::RoundAdvanced {
                update: RoundUpdateResponse::from(update.as_ref()),
            },
        }
    }
}

/// Error body for API failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn from_domain(err: &DomainError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, RoundId, Topic, UserId};

    #[test]
    fn round_response_serializes_ids_as_strings() {
        let round = Round::new(
            Topic::Books,
            "April".to_string(),
            UserId::new("mod").unwrap(),
        )
        .unwrap();
        let response = RoundResponse::from(&round);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"topic\":\"books\""));
        assert!(json.contains(&round.id().to_string()));
    }

    #[test]
    fn poll_response_includes_tally() {
        let mut discussion = Discussion::new(
            RoundId::new(),
            Topic::Books,
            "Book proposals: April".to_string(),
            String::new(),
            UserId::new("mod").unwrap(),
        )
        .unwrap();
        discussion
            .add_post(
                PostDraft {
                    title: "A".to_string(),
                    author: String::new(),
                    text: String::new(),
                    page_count: None,
                    url: None,
                    image_url: None,
                },
                UserId::new("alice").unwrap(),
            )
            .unwrap();
        discussion.close().unwrap();
        let mut poll = Poll::from_discussion(&discussion, UserId::new("mod").unwrap()).unwrap();
        let a = poll.options()[0].id;
        poll.cast_vote(UserId::new("alice").unwrap(), vec![a])
            .unwrap();

        let response = PollResponse::from(&poll);
        assert_eq!(response.tally.voter_count, 1);
        assert_eq!(response.tally.counts[0].votes, 1);
        assert_eq!(response.tally.voters, vec!["alice"]);
        assert_eq!(response.options.len(), 1);
        assert!(response.own_vote.is_none());

        let member_view = PollResponse::for_member(&poll, &UserId::new("alice").unwrap());
        assert_eq!(member_view.own_vote, Some(vec![a.to_string()]));
    }

    #[test]
    fn cast_vote_response_tags_status() {
        let outcome = CastVoteOutcome::Recorded(VoteCast {
            poll_id: crate::domain::foundation::PollId::new(),
            tally: Tally {
                counts: vec![],
                voters: Default::default(),
            },
        });
        let json = serde_json::to_string(&CastVoteResponse::from(&outcome)).unwrap();
        assert!(json.contains("\"status\":\"recorded\""));
    }

    #[test]
    fn error_response_carries_code_and_details() {
        let err = DomainError::new(ErrorCode::InvalidChoice, "bad choice")
            .with_detail("post_id", "abc");
        let response = ErrorResponse::from_domain(&err);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("INVALID_CHOICE"));
        assert!(json.contains("\"post_id\":\"abc\""));
    }

    #[test]
    fn start_round_request_deserializes() {
        let json = r#"{"topic": "themes", "title": "May"}"#;
        let req: StartRoundRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.topic, "themes");
        assert_eq!(req.title, "May");
        assert!(req.description.is_empty());
    }

    #[test]
    fn add_post_request_defaults_optional_fields() {
        let json = r#"{"title": "Solaris"}"#;
        let req: AddPostRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "Solaris");
        assert!(req.author.is_empty());
        assert!(req.page_count.is_none());
    }
}
