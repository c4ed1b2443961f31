//! Discussion handlers.

mod add_post;
mod get_discussion;

pub use add_post::{AddPostCommand, AddPostHandler, AddPostResult};
pub use get_discussion::GetDiscussionHandler;
