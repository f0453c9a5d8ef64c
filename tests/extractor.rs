//! Integration tests for the page scanning phase, backed by a mock server.
use std::sync::Arc;

use danbooru_downloader::auth::is_gold_account;
use danbooru_downloader::config::Credentials;
use danbooru_downloader::danbooru::error::ExtractorError;
use danbooru_downloader::{DanbooruExtractor, Rating, RunOptions};
use reqwest::Client;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn item(id: u64, rating: &str, score: i64) -> Value {
    json!({
        "id": id,
        "score": score,
        "rating": rating,
        "file_ext": "png",
        "file_url": format!("https://cdn.example/{}.png", id),
        "large_file_url": format!("https://cdn.example/sample/{}.png", id),
    })
}

fn options_for(tags: &[&str]) -> Arc<RunOptions> {
    Arc::new(RunOptions {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    })
}

fn extractor(server: &MockServer, options: Arc<RunOptions>) -> DanbooruExtractor {
    DanbooruExtractor::with_base_url(Client::new(), options, server.uri())
}

#[tokio::test]
async fn fetch_all_requests_each_page_once_and_merges() {
    let server = MockServer::start().await;

    for page in 1..=3u64 {
        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(vec![item(page * 10, "g", 5), item(page * 10 + 1, "e", 9)]),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let ext = extractor(&server, options_for(&["cat"]));
    let mut ids: Vec<u64> = ext.fetch_all(3, false).await.iter().map(|p| p.id).collect();
    ids.sort_unstable();

    assert_eq!(ids, vec![10, 11, 20, 21, 30, 31]);
}

#[tokio::test]
async fn failing_page_contributes_nothing() {
    let server = MockServer::start().await;

    for page in [1u64, 3] {
        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![item(page, "g", 1)]))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let ext = extractor(&server, options_for(&["cat"]));
    let mut ids: Vec<u64> = ext.fetch_all(3, false).await.iter().map(|p| p.id).collect();
    ids.sort_unstable();

    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn undecodable_page_body_contributes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<not json>"))
        .expect(1)
        .mount(&server)
        .await;

    let ext = extractor(&server, options_for(&["cat"]));
    assert!(ext.fetch_all(1, false).await.is_empty());
}

#[tokio::test]
async fn rating_filters_are_applied_per_post() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            item(1, "g", 0),
            item(2, "s", 0),
            item(3, "q", 0),
            item(4, "e", 0),
            item(5, "banana", 0),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let options = Arc::new(RunOptions {
        tags: vec!["cat".to_string()],
        questionable: false,
        explicit: false,
        ..Default::default()
    });

    let ext = extractor(&server, options);
    let posts = ext.fetch_all(1, false).await;
    let mut ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    ids.sort_unstable();

    // Unknown ratings always pass the filter.
    assert_eq!(ids, vec![1, 2, 5]);
    assert!(posts.iter().all(|p| p.rating != Rating::Questionable));
    assert!(posts.iter().all(|p| p.rating != Rating::Explicit));
}

#[tokio::test]
async fn posts_without_file_url_are_dropped() {
    let server = MockServer::start().await;

    let mut no_url = item(2, "g", 0);
    no_url["file_url"] = Value::Null;

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![item(1, "g", 0), no_url]))
        .expect(1)
        .mount(&server)
        .await;

    let ext = extractor(&server, options_for(&["cat"]));
    let posts = ext.fetch_all(1, false).await;

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 1);
}

#[tokio::test]
async fn page_requests_carry_field_selection_and_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .and(query_param("limit", "200"))
        .and(query_param(
            "only",
            "rating,file_url,id,score,file_ext,large_file_url",
        ))
        .and(query_param("login", "toast"))
        .and(query_param("api_key", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![item(1, "g", 0)]))
        .expect(1)
        .mount(&server)
        .await;

    let options = Arc::new(RunOptions {
        tags: vec!["cat".to_string()],
        auth: Some(Credentials {
            login: "toast".to_string(),
            api_key: "hunter2".to_string(),
        }),
        ..Default::default()
    });

    let ext = extractor(&server, options);
    assert_eq!(ext.fetch_all(1, false).await.len(), 1);
}

#[tokio::test]
async fn total_pages_reads_the_listing_paginator() {
    let server = MockServer::start().await;

    let html = "<html><body>\
                <div id=\"posts\"><div><article>post</article></div></div>\
                <div class=\"paginator\">\
                <a class=\"paginator-page desktop-only\">1</a>\
                <a class=\"paginator-page desktop-only\">42</a>\
                </div></body></html>";

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&server)
        .await;

    let ext = extractor(&server, options_for(&["cat"]));
    assert_eq!(ext.total_pages().await.unwrap(), 42);
}

#[tokio::test]
async fn empty_result_listing_is_fatal() {
    let server = MockServer::start().await;

    let html = "<html><body><div id=\"posts\"><div>\
                <p>No posts found.</p>\
                </div></div></body></html>";

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&server)
        .await;

    let ext = extractor(&server, options_for(&["cat"]));
    assert!(matches!(
        ext.total_pages().await,
        Err(ExtractorError::ZeroPosts)
    ));
}

#[tokio::test]
async fn gold_accounts_are_detected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile.json"))
        .and(query_param("login", "toast"))
        .and(query_param("api_key", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"level_string": "Gold"})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Credentials {
        login: "toast".to_string(),
        api_key: "hunter2".to_string(),
    };

    assert!(is_gold_account(&Client::new(), &server.uri(), &auth).await);
}

#[tokio::test]
async fn base_member_tier_stays_standard() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"level_string": "Member"})))
        .mount(&server)
        .await;

    let auth = Credentials {
        login: "toast".to_string(),
        api_key: "hunter2".to_string(),
    };

    assert!(!is_gold_account(&Client::new(), &server.uri(), &auth).await);
}

#[tokio::test]
async fn failed_probe_stays_standard() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let auth = Credentials {
        login: "toast".to_string(),
        api_key: "hunter2".to_string(),
    };

    assert!(!is_gold_account(&Client::new(), &server.uri(), &auth).await);
}

#[tokio::test]
async fn profile_without_level_stays_standard() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let auth = Credentials {
        login: "toast".to_string(),
        api_key: "hunter2".to_string(),
    };

    assert!(!is_gold_account(&Client::new(), &server.uri(), &auth).await);
}
