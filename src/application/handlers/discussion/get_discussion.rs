//! GetDiscussionHandler - loads one discussion by id.

use std::sync::Arc;

use crate::domain::discussion::Discussion;
use crate::domain::foundation::{DiscussionId, DomainError, ErrorCode};
use crate::ports::DiscussionRepository;

/// Query handler for a single discussion with its posts.
pub struct GetDiscussionHandler {
    discussions: Arc<dyn DiscussionRepository>,
}

impl GetDiscussionHandler {
    pub fn new(discussions: Arc<dyn DiscussionRepository>) -> Self {
        Self { discussions }
    }

    pub async fn handle(&self, discussion_id: DiscussionId) -> Result<Discussion, DomainError> {
        self.discussions
            .find_by_id(discussion_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DiscussionNotFound,
                    format!("Discussion not found: {}", discussion_id),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryClubStore;
    use crate::domain::foundation::{RoundId, Topic, UserId};

    #[tokio::test]
    async fn returns_stored_discussion() {
        let store = Arc::new(InMemoryClubStore::new());
        let discussion = Discussion::new(
            RoundId::new(),
            Topic::Themes,
            "Theme proposals: May".to_string(),
            String::new(),
            UserId::new("mod").unwrap(),
        )
        .unwrap();
        DiscussionRepository::save(&*store, &discussion)
            .await
            .unwrap();

        let handler = GetDiscussionHandler::new(store);
        let found = handler.handle(discussion.id()).await.unwrap();
        assert_eq!(found, discussion);
    }

    #[tokio::test]
    async fn missing_discussion_fails_with_not_found() {
        let handler = GetDiscussionHandler::new(Arc::new(InMemoryClubStore::new()));
        let err = handler.handle(DiscussionId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscussionNotFound);
    }
}
