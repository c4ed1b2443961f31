//! Mapping from domain errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::ErrorResponse;

/// API error wrapper carrying the domain error through to the response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError(DomainError::new(ErrorCode::InvalidFormat, message))
    }

    fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::RoundNotFound
            | ErrorCode::DiscussionNotFound
            | ErrorCode::PollNotFound
            | ErrorCode::BookNotFound => StatusCode::NOT_FOUND,

            ErrorCode::AlreadyClosed
            | ErrorCode::DiscussionClosed
            | ErrorCode::PollClosed
            | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,

            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::InvalidFormat
            | ErrorCode::InvalidChoice
            | ErrorCode::InvalidTopic
            | ErrorCode::EmptyProposalSet
            | ErrorCode::NoVotesCast => StatusCode::BAD_REQUEST,

            ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,

            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse::from_domain(&self.0);
        (status, Json(body)).into_response()
    }
}
