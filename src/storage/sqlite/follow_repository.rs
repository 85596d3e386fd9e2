use crate::errors::{FeedError, FeedResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FollowRepository;

pub struct SqliteFollowRepository {
    storage: SqliteStorage,
}

impl SqliteFollowRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl FollowRepository for SqliteFollowRepository {
    fn get_followed_publication_slugs(&self, user_id: &str) -> FeedResult<Vec<String>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT publication_slug FROM followed_publications WHERE user_id = ?1 ORDER BY id ASC",
        )?;

        let slugs = stmt.query_map([user_id], |row| row.get(0))?;

        slugs.collect::<Result<Vec<String>, _>>().map_err(FeedError::from)
    }

    fn follow(&self, user_id: &str, slug: &str) -> FeedResult<bool> {
        let conn = self.storage.connection()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO followed_publications (user_id, publication_slug) VALUES (?1, ?2)",
            (user_id, slug),
        )?;
        Ok(inserted > 0)
    }

    fn unfollow(&self, user_id: &str, slug: &str) -> FeedResult<bool> {
        let conn = self.storage.connection()?;
        let deleted = conn.execute(
            "DELETE FROM followed_publications WHERE user_id = ?1 AND publication_slug = ?2",
            (user_id, slug),
        )?;
        Ok(deleted > 0)
    }

    fn is_following(&self, user_id: &str, slug: &str) -> FeedResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT EXISTS(SELECT 1 FROM followed_publications WHERE user_id = ?1 AND publication_slug = ?2)",
        )?;
        let exists: bool = stmt.query_row((user_id, slug), |row| row.get(0))?;
        Ok(exists)
    }
}
