use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::domain::Article;
use crate::errors::{FeedError, FeedResult};
use crate::gateway::traits::ArticleGateway;

const ARTICLE_FIELDS: &str = r#"
fragment ArticleFields on Article {
    id
    title
    articleURL
    imageURL
    publicationSlug
    date
    shoutouts
    nsfw
}
"#;

const TRENDING_QUERY: &str = r#"
query TrendingArticles($limit: Float) {
    getTrendingArticles(limit: $limit) { ...ArticleFields }
}
"#;

const BY_SLUGS_QUERY: &str = r#"
query ArticlesByPublicationSlugs($slugs: [String!]!) {
    getArticlesByPublicationSlugs(slugs: $slugs) { ...ArticleFields }
}
"#;

const SHUFFLED_BY_SLUGS_QUERY: &str = r#"
query ShuffledArticlesByPublicationSlugs($slugs: [String!]!) {
    getShuffledArticlesByPublicationSlugs(slugs: $slugs) { ...ArticleFields }
}
"#;

const ALL_PUBLICATIONS_QUERY: &str = r#"
query AllPublicationSlugs {
    getAllPublications { slug }
}
"#;

/// Append the shared article fragment to a query that spreads it.
fn with_article_fields(query: &str) -> String {
    format!("{}{}", query, ARTICLE_FIELDS)
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: String,
    variables: serde_json::Value,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleDto {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "articleURL")]
    article_url: Option<String>,
    #[serde(rename = "imageURL")]
    image_url: Option<String>,
    publication_slug: String,
    date: DateTime<Utc>,
    #[serde(default)]
    shoutouts: f64,
    #[serde(default)]
    nsfw: bool,
}

impl From<ArticleDto> for Article {
    fn from(dto: ArticleDto) -> Self {
        // Shoutouts arrive as a GraphQL Float
        let shoutouts = dto.shoutouts.max(0.0).round() as u32;

        Article::new(dto.id, dto.publication_slug, dto.date)
            .with_title(dto.title)
            .with_shoutouts(shoutouts)
            .with_article_url(dto.article_url.filter(|u| !u.is_empty()))
            .with_image_url(dto.image_url.filter(|u| !u.is_empty()))
            .with_nsfw(dto.nsfw)
    }
}

#[derive(Debug, Deserialize)]
struct TrendingData {
    #[serde(rename = "getTrendingArticles")]
    articles: Vec<ArticleDto>,
}

#[derive(Debug, Deserialize)]
struct BySlugsData {
    #[serde(rename = "getArticlesByPublicationSlugs")]
    articles: Vec<ArticleDto>,
}

#[derive(Debug, Deserialize)]
struct ShuffledBySlugsData {
    #[serde(rename = "getShuffledArticlesByPublicationSlugs")]
    articles: Vec<ArticleDto>,
}

#[derive(Debug, Deserialize)]
struct PublicationSlugDto {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct AllPublicationsData {
    #[serde(rename = "getAllPublications")]
    publications: Vec<PublicationSlugDto>,
}

/// `ArticleGateway` backed by the platform's GraphQL endpoint.
pub struct GraphQlGateway {
    client: Client,
    endpoint: Url,
}

impl GraphQlGateway {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("homefeed/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: String,
        variables: serde_json::Value,
    ) -> FeedResult<T> {
        let request = GraphQlRequest {
            query,
            variables,
            operation_name,
        };

        debug!(operation = operation_name, endpoint = %self.endpoint, "sending GraphQL query");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: GraphQlResponse<T> = response.json().await?;

        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(FeedError::GraphQl(format!(
                "{}: {}",
                operation_name,
                messages.join("; ")
            )));
        }

        body.data
            .ok_or_else(|| FeedError::GraphQl(format!("{}: response has no data", operation_name)))
    }
}

#[async_trait]
impl ArticleGateway for GraphQlGateway {
    async fn fetch_trending(&self, limit: usize) -> FeedResult<Vec<Article>> {
        let data: TrendingData = self
            .execute(
                "TrendingArticles",
                with_article_fields(TRENDING_QUERY),
                json!({ "limit": limit }),
            )
            .await?;
        Ok(data.articles.into_iter().map(Article::from).collect())
    }

    async fn fetch_by_publication_slugs(&self, slugs: &[String]) -> FeedResult<Vec<Article>> {
        let data: BySlugsData = self
            .execute(
                "ArticlesByPublicationSlugs",
                with_article_fields(BY_SLUGS_QUERY),
                json!({ "slugs": slugs }),
            )
            .await?;
        Ok(data.articles.into_iter().map(Article::from).collect())
    }

    async fn fetch_shuffled_by_publication_slugs(
        &self,
        slugs: &[String],
    ) -> FeedResult<Vec<Article>> {
        let data: ShuffledBySlugsData = self
            .execute(
                "ShuffledArticlesByPublicationSlugs",
                with_article_fields(SHUFFLED_BY_SLUGS_QUERY),
                json!({ "slugs": slugs }),
            )
            .await?;
        Ok(data.articles.into_iter().map(Article::from).collect())
    }

    async fn fetch_all_publication_slugs(&self) -> FeedResult<Vec<String>> {
        let data: AllPublicationsData = self
            .execute(
                "AllPublicationSlugs",
                ALL_PUBLICATIONS_QUERY.to_string(),
                json!({}),
            )
            .await?;
        Ok(data.publications.into_iter().map(|p| p.slug).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_dto_conversion() {
        let dto: ArticleDto = serde_json::from_value(json!({
            "id": "abc",
            "title": "Slope Day Recap",
            "articleURL": "https://cornellsun.com/slope-day",
            "imageURL": "",
            "publicationSlug": "cornell-daily-sun",
            "date": "2024-05-02T14:30:00Z",
            "shoutouts": 12.0,
            "nsfw": false
        }))
        .unwrap();

        let article = Article::from(dto);
        assert_eq!(article.id, "abc");
        assert_eq!(article.publication_slug, "cornell-daily-sun");
        assert_eq!(article.shoutout_count, 12);
        assert_eq!(article.image_url, None);
        assert_eq!(
            article.article_url.as_deref(),
            Some("https://cornellsun.com/slope-day")
        );
    }

    #[test]
    fn test_negative_shoutouts_clamp_to_zero() {
        let dto: ArticleDto = serde_json::from_value(json!({
            "id": "x",
            "publicationSlug": "slope-media",
            "date": "2024-05-02T14:30:00Z",
            "shoutouts": -4.0
        }))
        .unwrap();

        assert_eq!(Article::from(dto).shoutout_count, 0);
    }

    #[test]
    fn test_graphql_errors_deserialize() {
        let body: GraphQlResponse<TrendingData> = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "boom", "path": ["getTrendingArticles"] }]
        }))
        .unwrap();

        assert!(body.data.is_none());
        assert_eq!(body.errors[0].message, "boom");
    }
}
