//! Route configuration for the club API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    add_post, cast_vote, close_discussion, close_poll, get_discussion, get_poll, get_round,
    list_rounds, start_round, ClubAppState,
};

/// Creates the club router with all endpoints.
///
/// Routes:
/// - `POST /api/rounds` - Start a round
/// - `GET /api/rounds` - List rounds, newest first
/// - `GET /api/rounds/:id` - Round details
/// - `GET /api/discussions/:id` - Discussion with posts
/// - `POST /api/discussions/:id/posts` - Add a proposal
/// - `POST /api/discussions/:id/close` - Close and open voting
/// - `GET /api/polls/:id` - Poll with options and tally
/// - `POST /api/polls/:id/votes` - Cast or replace a ballot
/// - `POST /api/polls/:id/close` - Resolve and advance the round
pub fn club_router() -> Router<ClubAppState> {
    Router::new()
        .route("/api/rounds", post(start_round).get(list_rounds))
        .route("/api/rounds/:id", get(get_round))
        .route("/api/discussions/:id", get(get_discussion))
        .route("/api/discussions/:id/posts", post(add_post))
        .route("/api/discussions/:id/close", post(close_discussion))
        .route("/api/polls/:id", get(get_poll))
        .route("/api/polls/:id/votes", post(cast_vote))
        .route("/api/polls/:id/close", post(close_poll))
}
