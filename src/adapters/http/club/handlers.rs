//! HTTP handlers for the club API.
//!
//! These handlers connect axum routes to application layer handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Json, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::discussion::{
    AddPostCommand, AddPostHandler, GetDiscussionHandler,
};
use crate::application::handlers::poll::{CastVoteCommand, CastVoteHandler, GetPollHandler};
use crate::application::handlers::round::{
    CloseDiscussionCommand, CloseDiscussionHandler, ClosePollCommand, ClosePollHandler,
    GetRoundHandler, ListRoundsHandler, StartRoundCommand, StartRoundHandler,
};
use crate::application::{Newsletter, RoundLocks};
use crate::domain::foundation::{
    DiscussionId, PollId, PostId, RoundId, Topic, UserId,
};
use crate::ports::{
    DiscussionRepository, MemberRoster, PollRepository, RoundRepository, TransitionWriter,
};

use super::dto::{
    AddPostRequest, CastVoteRequest, CastVoteResponse, CloseDiscussionResponse, DiscussionResponse,
    ErrorResponse, PollResponse, PostResponse, RoundResponse, RoundUpdateResponse,
    StartRoundRequest, StartRoundResponse,
};
use super::error::ApiError;

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ClubAppState {
    pub rounds: Arc<dyn RoundRepository>,
    pub discussions: Arc<dyn DiscussionRepository>,
    pub polls: Arc<dyn PollRepository>,
    pub roster: Arc<dyn MemberRoster>,
    pub writer: Arc<dyn TransitionWriter>,
    pub locks: Arc<RoundLocks>,
    pub newsletter: Arc<Newsletter>,
}

impl ClubAppState {
    pub fn start_round_handler(&self) -> StartRoundHandler {
        StartRoundHandler::new(self.writer.clone(), self.newsletter.clone())
    }

    pub fn add_post_handler(&self) -> AddPostHandler {
        AddPostHandler::new(
            self.discussions.clone(),
            self.locks.clone(),
            self.newsletter.clone(),
        )
    }

    pub fn close_discussion_handler(&self) -> CloseDiscussionHandler {
        CloseDiscussionHandler::new(
            self.rounds.clone(),
            self.discussions.clone(),
            self.writer.clone(),
            self.locks.clone(),
            self.newsletter.clone(),
        )
    }

    pub fn close_poll_handler(&self) -> ClosePollHandler {
        ClosePollHandler::new(
            self.rounds.clone(),
            self.polls.clone(),
            self.writer.clone(),
            self.locks.clone(),
            self.newsletter.clone(),
        )
    }

    pub fn cast_vote_handler(&self) -> CastVoteHandler {
        CastVoteHandler::new(
            self.polls.clone(),
            self.roster.clone(),
            self.locks.clone(),
            Arc::new(self.close_poll_handler()),
        )
    }

    pub fn get_round_handler(&self) -> GetRoundHandler {
        GetRoundHandler::new(self.rounds.clone())
    }

    pub fn list_rounds_handler(&self) -> ListRoundsHandler {
        ListRoundsHandler::new(self.rounds.clone())
    }

    pub fn get_discussion_handler(&self) -> GetDiscussionHandler {
        GetDiscussionHandler::new(self.discussions.clone())
    }

    pub fn get_poll_handler(&self) -> GetPollHandler {
        GetPollHandler::new(self.polls.clone())
    }
}

/// Authenticated member context extracted from the request.
///
/// Identity itself is delegated to the reverse proxy or gateway in front
/// of this service, which injects the member id as a header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection for requests without a usable member id.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse {
            code: "AUTHENTICATION_REQUIRED".to_string(),
            message: "Authentication is required".to_string(),
            details: Default::default(),
        };
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s).ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// POST /api/rounds - Start a new round.
pub async fn start_round(
    State(state): State<ClubAppState>,
    user: AuthenticatedUser,
    Json(request): Json<StartRoundRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let topic: Topic = request.topic.parse()?;
    let result = state
        .start_round_handler()
        .handle(StartRoundCommand {
            topic,
            title: request.title,
            description: request.description,
            owner: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(StartRoundResponse::from(&result))))
}

/// GET /api/rounds - List all rounds, newest first.
pub async fn list_rounds(
    State(state): State<ClubAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rounds = state.list_rounds_handler().handle().await?;
    let response: Vec<RoundResponse> = rounds.iter().map(RoundResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/rounds/:id - Round details.
pub async fn get_round(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let round_id: RoundId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid round id format"))?;
    let round = state.get_round_handler().handle(round_id).await?;
    Ok(Json(RoundResponse::from(&round)))
}

/// GET /api/discussions/:id - Discussion with its posts.
pub async fn get_discussion(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let discussion_id: DiscussionId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid discussion id format"))?;
    let discussion = state
        .get_discussion_handler()
        .handle(discussion_id)
        .await?;
    Ok(Json(DiscussionResponse::from(&discussion)))
}

/// POST /api/discussions/:id/posts - Add a proposal.
pub async fn add_post(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
    user: AuthenticatedUser,
    Json(request): Json<AddPostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let discussion_id: DiscussionId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid discussion id format"))?;
    let result = state
        .add_post_handler()
        .handle(AddPostCommand {
            discussion_id,
            draft: request.into(),
            owner: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&result.post))))
}

/// POST /api/discussions/:id/close - Freeze the discussion and open voting.
pub async fn close_discussion(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let discussion_id: DiscussionId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid discussion id format"))?;
    let result = state
        .close_discussion_handler()
        .handle(CloseDiscussionCommand {
            discussion_id,
            actor: user.user_id,
        })
        .await?;

    Ok(Json(CloseDiscussionResponse::from(&result)))
}

/// GET /api/polls/:id - Poll with options, tally, and the caller's ballot.
pub async fn get_poll(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let poll_id: PollId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid poll id format"))?;
    let poll = state.get_poll_handler().handle(poll_id).await?;
    Ok(Json(PollResponse::for_member(&poll, &user.user_id)))
}

/// POST /api/polls/:id/votes - Cast or replace the caller's ballot.
pub async fn cast_vote(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
    user: AuthenticatedUser,
    Json(request): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let poll_id: PollId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid poll id format"))?;
    let post_ids = request
        .post_ids
        .iter()
        .map(|raw| raw.parse::<PostId>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ApiError::bad_request("Invalid post id format"))?;

    let outcome = state
        .cast_vote_handler()
        .handle(CastVoteCommand {
            poll_id,
            voter: user.user_id,
            post_ids,
        })
        .await?;

    Ok(Json(CastVoteResponse::from(&outcome)))
}

/// POST /api/polls/:id/close - Resolve the poll and advance the round.
pub async fn close_poll(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let poll_id: PollId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid poll id format"))?;
    let update = state
        .close_poll_handler()
        .handle(ClosePollCommand {
            poll_id,
            actor: user.user_id,
        })
        .await?;

    Ok(Json(RoundUpdateResponse::from(&update)))
}
