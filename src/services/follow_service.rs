use regex::Regex;

use crate::errors::{FeedError, FeedResult};
use crate::storage::traits::FollowRepository;

const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

pub struct FollowService<R: FollowRepository> {
    repository: R,
}

impl<R: FollowRepository> FollowService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Follow a publication by slug.
    /// Returns the normalized slug and whether it was newly followed.
    pub fn follow(&self, user_id: &str, slug: &str) -> FeedResult<(String, bool)> {
        let slug = normalize_slug(slug)?;
        let added = self.repository.follow(user_id, &slug)?;
        Ok((slug, added))
    }

    /// Stop following a publication
    pub fn unfollow(&self, user_id: &str, slug: &str) -> FeedResult<(String, bool)> {
        let slug = normalize_slug(slug)?;
        let removed = self.repository.unfollow(user_id, &slug)?;
        Ok((slug, removed))
    }

    /// List followed publication slugs, oldest follow first
    pub fn list(&self, user_id: &str) -> FeedResult<Vec<String>> {
        self.repository.get_followed_publication_slugs(user_id)
    }

    pub fn is_following(&self, user_id: &str, slug: &str) -> FeedResult<bool> {
        let slug = normalize_slug(slug)?;
        self.repository.is_following(user_id, &slug)
    }
}

/// Lowercase and validate a publication slug such as `cornell-daily-sun`
pub fn normalize_slug(slug: &str) -> FeedResult<String> {
    let normalized = slug.trim().to_lowercase();
    let pattern = Regex::new(SLUG_PATTERN).map_err(|e| FeedError::Config(e.to_string()))?;

    if pattern.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(FeedError::InvalidSlug(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{SqliteFollowRepository, SqliteStorage};
    use crate::storage::traits::MockFollowRepository;

    fn setup() -> FollowService<SqliteFollowRepository> {
        let storage = SqliteStorage::in_memory().unwrap();
        FollowService::new(SqliteFollowRepository::new(storage))
    }

    #[test]
    fn test_list_empty() {
        let service = setup();
        assert!(service.list("local").unwrap().is_empty());
    }

    #[test]
    fn test_follow_normalizes_slug() {
        let service = setup();

        let (slug, added) = service.follow("local", "  Cornell-Daily-Sun ").unwrap();
        assert_eq!(slug, "cornell-daily-sun");
        assert!(added);
        assert!(service.is_following("local", "cornell-daily-sun").unwrap());
        assert_eq!(service.list("local").unwrap(), vec!["cornell-daily-sun"]);
    }

    #[test]
    fn test_unfollow_missing_reports_false() {
        let service = setup();
        let (_, removed) = service.unfollow("local", "slope-media").unwrap();
        assert!(!removed);
    }

    #[test]
    fn test_invalid_slugs_rejected() {
        for bad in ["", "has space", "trailing-", "-leading", "double--dash", "under_score"] {
            assert!(
                matches!(normalize_slug(bad), Err(FeedError::InvalidSlug(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_invalid_slug_never_reaches_repository() {
        let mut repo = MockFollowRepository::new();
        repo.expect_follow().times(0);

        let service = FollowService::new(repo);
        assert!(service.follow("local", "not a slug").is_err());
    }

    #[test]
    fn test_follow_passes_user_and_slug() {
        let mut repo = MockFollowRepository::new();
        repo.expect_follow()
            .withf(|user, slug| user == "u7" && slug == "review")
            .times(1)
            .returning(|_, _| Ok(true));

        let service = FollowService::new(repo);
        assert_eq!(service.follow("u7", "Review").unwrap(), ("review".to_string(), true));
    }
}
