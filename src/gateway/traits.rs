use async_trait::async_trait;

use crate::domain::Article;
use crate::errors::FeedResult;

/// Remote source of articles and publications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleGateway: Send + Sync {
    /// Most shouted-out recent articles, at most `limit` of them
    async fn fetch_trending(&self, limit: usize) -> FeedResult<Vec<Article>>;

    /// Articles from the given publications
    async fn fetch_by_publication_slugs(&self, slugs: &[String]) -> FeedResult<Vec<Article>>;

    /// A shuffled sample of articles across the given publications
    async fn fetch_shuffled_by_publication_slugs(
        &self,
        slugs: &[String],
    ) -> FeedResult<Vec<Article>>;

    /// Slugs of every publication known to the backend
    async fn fetch_all_publication_slugs(&self) -> FeedResult<Vec<String>>;
}
