//! Integration tests for `NaverNewsClient` and the collector using wiremock HTTP mocks.

use std::time::Duration;

use talkdb_news::{collect_news, CollectorSettings, NaverNewsClient, NewsError, NewsSearch};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NaverNewsClient {
    NaverNewsClient::with_base_url("client-id", "client-secret", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_sends_credentials_and_parses_items() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "lastBuildDate": "Mon, 06 Jan 2025 10:00:00 +0900",
        "total": 1,
        "start": 1,
        "display": 1,
        "items": [
            {
                "title": "<b>맛집</b> 웨이팅 3시간 화제의 베이글 가게",
                "originallink": "https://example.com/article/1",
                "link": "https://n.news.naver.com/article/1",
                "description": "줄 서는 &quot;베이글&quot; 맛집",
                "pubDate": "Mon, 06 Jan 2025 09:30:00 +0900"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v1/search/news.json"))
        .and(query_param("query", "맛집"))
        .and(query_param("display", "3"))
        .and(query_param("sort", "date"))
        .and(query_param("start", "1"))
        .and(header("X-Naver-Client-Id", "client-id"))
        .and(header("X-Naver-Client-Secret", "client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client.search("맛집", 3).await.expect("search should succeed");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].original_link, "https://example.com/article/1");
    assert_eq!(items[0].pub_date, "Mon, 06 Jan 2025 09:30:00 +0900");
    assert!(items[0].title.contains("<b>"));
}

#[tokio::test]
async fn search_with_no_items_returns_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/news.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"total": 0})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client.search("없는검색어", 3).await.expect("search should succeed");
    assert!(items.is_empty());
}

#[tokio::test]
async fn search_surfaces_non_2xx_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errorMessage": "Authentication failed",
            "errorCode": "024"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("영화", 3).await.unwrap_err();
    assert!(matches!(err, NewsError::Http(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn search_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("영화", 3).await.unwrap_err();
    assert!(matches!(err, NewsError::Deserialize { .. }));
}

#[tokio::test]
async fn collector_survives_a_failing_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let settings = CollectorSettings {
        query_delay: Duration::ZERO,
        ..CollectorSettings::default()
    };

    let report = collect_news(&client, &settings, 100).await;
    assert!(report.items.is_empty());
    assert_eq!(report.failed_queries.len(), talkdb_news::SEARCH_QUERIES.len());
}
