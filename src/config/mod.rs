use url::Url;

use crate::errors::{FeedError, FeedResult};

pub const DEFAULT_TRENDING_LIMIT: usize = 7;
pub const DEFAULT_FOLLOWING_LIMIT: usize = 20;
pub const DEFAULT_OTHER_LIMIT: usize = 45;

/// Per-section size limits for one feed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedLimits {
    pub trending: usize,
    pub following: usize,
    pub other: usize,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            trending: DEFAULT_TRENDING_LIMIT,
            following: DEFAULT_FOLLOWING_LIMIT,
            other: DEFAULT_OTHER_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Option<String>,
    pub db_path: String,
    pub user_id: String,
    pub limits: FeedLimits,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let api_url = std::env::var("HOMEFEED_API_URL").ok();

        let db_path = std::env::var("HOMEFEED_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("homefeed.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./homefeed.db".to_string())
        });

        let user_id = std::env::var("HOMEFEED_USER_ID").unwrap_or_else(|_| "local".to_string());

        let limits = FeedLimits {
            trending: limit_from_env("HOMEFEED_TRENDING_LIMIT", DEFAULT_TRENDING_LIMIT)?,
            following: limit_from_env("HOMEFEED_FOLLOWING_LIMIT", DEFAULT_FOLLOWING_LIMIT)?,
            other: limit_from_env("HOMEFEED_OTHER_LIMIT", DEFAULT_OTHER_LIMIT)?,
        };

        Ok(Self {
            api_url,
            db_path,
            user_id,
            limits,
        })
    }

    /// The GraphQL endpoint, required only by commands that talk to the backend.
    pub fn require_api_url(&self) -> FeedResult<Url> {
        let raw = self
            .api_url
            .as_deref()
            .ok_or_else(|| FeedError::MissingEnvVar("HOMEFEED_API_URL".to_string()))?;

        Url::parse(raw).map_err(|e| FeedError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}

fn limit_from_env(name: &str, default: usize) -> FeedResult<usize> {
    match std::env::var(name) {
        Ok(raw) => parse_limit(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_limit(name: &str, raw: &str) -> FeedResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(FeedError::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
        Ok(limit) => Ok(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = FeedLimits::default();
        assert_eq!(limits.trending, 7);
        assert_eq!(limits.following, 20);
        assert_eq!(limits.other, 45);
    }

    #[test]
    fn test_parse_limit_accepts_positive() {
        assert_eq!(parse_limit("X", " 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_limit_rejects_zero_and_garbage() {
        assert!(matches!(parse_limit("X", "0"), Err(FeedError::Config(_))));
        assert!(matches!(parse_limit("X", "lots"), Err(FeedError::Config(_))));
        assert!(matches!(parse_limit("X", "-3"), Err(FeedError::Config(_))));
    }

    #[test]
    fn test_require_api_url() {
        let mut config = Config {
            api_url: None,
            db_path: ":memory:".to_string(),
            user_id: "local".to_string(),
            limits: FeedLimits::default(),
        };
        assert!(matches!(
            config.require_api_url(),
            Err(FeedError::MissingEnvVar(_))
        ));

        config.api_url = Some("not a url".to_string());
        assert!(matches!(config.require_api_url(), Err(FeedError::InvalidUrl(_))));

        config.api_url = Some("https://api.example.com/graphql".to_string());
        assert_eq!(
            config.require_api_url().unwrap().as_str(),
            "https://api.example.com/graphql"
        );
    }
}
