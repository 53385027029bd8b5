//! End-to-end pipeline passes against mocked providers and an in-memory sink.

use chrono::{TimeZone, Utc};
use qdata_core::{FixedClock, MemorySink, Platform};
use qdata_ingest::{
    run_pipeline, ErrorKind, GdeltAdapter, GdeltOptions, NewsApiAdapter, NewsApiOptions,
};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap())
}

fn newsapi(base_url: &str) -> NewsApiAdapter {
    NewsApiAdapter::new(NewsApiOptions::with_base_url(base_url, "test-key"))
        .expect("adapter construction should not fail")
}

#[tokio::test]
async fn default_query_article_becomes_one_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "finance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [{ "title": "T", "url": "https://x" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = MemorySink::new();
    let report = run_pipeline(&newsapi(&server.uri()), &sink, &clock(), None).await;

    assert!(report.is_clean(), "{report}");
    assert_eq!(report.query, "finance");
    assert_eq!(report.fetched, 1);
    assert_eq!(report.inserted, 1);

    let docs = sink.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].title, "T");
    assert_eq!(docs[0].url, "https://x");
    assert_eq!(docs[0].source.platform, Platform::NewsApi);
    assert_eq!(docs[0].collected_at, clock().0);
}

#[tokio::test]
async fn non_json_body_yields_parse_error_and_no_store_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let sink = MemorySink::new();
    let report = run_pipeline(&newsapi(&server.uri()), &sink, &clock(), None).await;

    assert_eq!(report.fetched, 0);
    assert_eq!(report.inserted, 0);
    assert!(matches!(report.fetch_error, Some((ErrorKind::Parse, _))));
    assert_eq!(sink.batch_calls(), 0);
}

#[tokio::test]
async fn three_valid_articles_are_all_stored() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [
                { "title": "One", "url": "https://news.example/1", "domain": "news.example" },
                { "title": "Two", "url": "https://news.example/2", "domain": "news.example" },
                { "title": "Three", "url": "https://news.example/3", "domain": "news.example" },
                { "title": "", "url": "https://news.example/4" }
            ]
        })))
        .mount(&server)
        .await;

    let adapter = GdeltAdapter::new(GdeltOptions::with_base_url(&server.uri()))
        .expect("adapter construction should not fail");
    let sink = MemorySink::new();
    let report = run_pipeline(&adapter, &sink, &clock(), Some("stocks")).await;

    assert_eq!(report.query, "stocks");
    assert_eq!(report.fetched, 4);
    assert_eq!(report.normalized, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.inserted, 3);

    let urls: Vec<String> = sink.documents().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://news.example/1",
            "https://news.example/2",
            "https://news.example/3"
        ]
    );
}

#[tokio::test]
async fn rejected_batch_is_reported_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [{ "title": "T", "url": "https://x" }]
        })))
        .mount(&server)
        .await;

    let sink = MemorySink::rejecting("connection reset");
    let report = run_pipeline(&newsapi(&server.uri()), &sink, &clock(), None).await;

    assert_eq!(report.normalized, 1);
    assert_eq!(report.inserted, 0);
    assert!(report.fetch_error.is_none());
    assert!(report
        .persist_error
        .as_deref()
        .is_some_and(|e| e.contains("connection reset")));
}
