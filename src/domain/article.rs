use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ArticleId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub publication_slug: String,
    pub published_date: DateTime<Utc>,
    pub shoutout_count: u32,
    pub article_url: Option<String>,
    pub image_url: Option<String>,
    pub nsfw: bool,
}

impl Article {
    pub fn new(
        id: impl Into<ArticleId>,
        publication_slug: impl Into<String>,
        published_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            publication_slug: publication_slug.into(),
            published_date,
            shoutout_count: 0,
            article_url: None,
            image_url: None,
            nsfw: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_shoutouts(mut self, shoutout_count: u32) -> Self {
        self.shoutout_count = shoutout_count;
        self
    }

    pub fn with_article_url(mut self, article_url: Option<String>) -> Self {
        self.article_url = article_url;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = nsfw;
        self
    }
}
