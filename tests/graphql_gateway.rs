use homefeed::errors::FeedError;
use homefeed::gateway::{ArticleGateway, GraphQlGateway};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> GraphQlGateway {
    let endpoint = Url::parse(&format!("{}/graphql", server.uri())).unwrap();
    GraphQlGateway::new(endpoint)
}

fn article_json(id: &str, slug: &str, date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Article {}", id),
        "articleURL": format!("https://example.com/{}", id),
        "imageURL": null,
        "publicationSlug": slug,
        "date": date,
        "shoutouts": 3.0,
        "nsfw": false
    })
}

#[tokio::test]
async fn trending_sends_limit_and_maps_articles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("getTrendingArticles"))
        .and(body_partial_json(json!({ "variables": { "limit": 7 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getTrendingArticles": [
                    article_json("a1", "cornell-daily-sun", "2024-04-01T10:00:00Z"),
                    article_json("a2", "slope-media", "2024-04-02T10:00:00Z")
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let articles = gateway(&server).fetch_trending(7).await.expect("trending ok");

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, "a1");
    assert_eq!(articles[0].publication_slug, "cornell-daily-sun");
    assert_eq!(articles[0].shoutout_count, 3);
    assert_eq!(articles[1].title, "Article a2");
}

#[tokio::test]
async fn by_slugs_sends_slug_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("getArticlesByPublicationSlugs"))
        .and(body_partial_json(json!({ "variables": { "slugs": ["sun", "review"] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getArticlesByPublicationSlugs": [
                    article_json("b1", "sun", "2024-04-01T10:00:00Z")
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let slugs = vec!["sun".to_string(), "review".to_string()];
    let articles = gateway(&server)
        .fetch_by_publication_slugs(&slugs)
        .await
        .expect("by slugs ok");

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, "b1");
}

#[tokio::test]
async fn shuffled_by_slugs_maps_articles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("getShuffledArticlesByPublicationSlugs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getShuffledArticlesByPublicationSlugs": [
                    article_json("s1", "sun", "2024-04-01T10:00:00Z"),
                    article_json("s2", "review", "2024-04-03T10:00:00Z")
                ]
            }
        })))
        .mount(&server)
        .await;

    let articles = gateway(&server)
        .fetch_shuffled_by_publication_slugs(&["sun".to_string()])
        .await
        .expect("shuffled ok");

    let ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2"]);
}

#[tokio::test]
async fn all_publication_slugs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("getAllPublications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getAllPublications": [{ "slug": "sun" }, { "slug": "slope-media" }]
            }
        })))
        .mount(&server)
        .await;

    let slugs = gateway(&server)
        .fetch_all_publication_slugs()
        .await
        .expect("publications ok");

    assert_eq!(slugs, vec!["sun", "slope-media"]);
}

#[tokio::test]
async fn graphql_errors_become_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "publication service unavailable" }]
        })))
        .mount(&server)
        .await;

    let err = gateway(&server).fetch_all_publication_slugs().await.unwrap_err();

    match err {
        FeedError::GraphQl(message) => {
            assert!(message.contains("publication service unavailable"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn missing_data_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = gateway(&server).fetch_trending(3).await.unwrap_err();
    assert!(matches!(err, FeedError::GraphQl(_)));
}

#[tokio::test]
async fn http_error_status_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = gateway(&server).fetch_trending(3).await.unwrap_err();
    assert!(matches!(err, FeedError::Http(_)));
    assert!(err.is_network());
}
