use crate::errors::FeedResult;

/// Local record of which publications a user follows.
#[cfg_attr(test, mockall::automock)]
pub trait FollowRepository: Send + Sync {
    fn get_followed_publication_slugs(&self, user_id: &str) -> FeedResult<Vec<String>>;
    /// Returns false if the slug was already followed
    fn follow(&self, user_id: &str, slug: &str) -> FeedResult<bool>;
    /// Returns false if the slug was not followed
    fn unfollow(&self, user_id: &str, slug: &str) -> FeedResult<bool>;
    fn is_following(&self, user_id: &str, slug: &str) -> FeedResult<bool>;
}
