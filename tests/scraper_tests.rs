use pretty_assertions::assert_eq;
use std::time::Duration;
use tldr_llama::scraper::{extract_text, extract_title, fetch_content, fetch_page, ScraperError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"<html>
<head>
  <title>Async Rust in Practice</title>
  <style>body { color: red; }</style>
  <script>var tracker = "do not include";</script>
</head>
<body>
  <h1>Async Rust</h1>
  <p>Futures are lazy.</p>
  <p>   Executors   poll them. </p>
  <noscript>Enable JavaScript</noscript>
</body>
</html>"#;

#[test]
fn test_extract_text_drops_script_and_style() {
    let text = extract_text(ARTICLE);
    assert!(!text.contains("tracker"));
    assert!(!text.contains("color: red"));
    assert!(!text.contains("Enable JavaScript"));
    assert_eq!(
        text,
        "Async Rust in Practice\nAsync Rust\nFutures are lazy.\nExecutors   poll them."
    );
}

#[test]
fn test_extract_text_of_empty_markup() {
    assert_eq!(extract_text(""), "");
    assert_eq!(extract_text("<html><body><script>x()</script></body></html>"), "");
}

#[test]
fn test_extract_title_prefers_title_tag() {
    assert_eq!(
        extract_title(ARTICLE).as_deref(),
        Some("Async Rust in Practice")
    );
}

#[tokio::test]
async fn test_fetch_page_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .mount(&server)
        .await;

    let url = format!("{}/article", server.uri());
    let body = fetch_page(&url, Duration::from_secs(5)).await.unwrap();

    assert_eq!(body, ARTICLE);
}

#[tokio::test]
async fn test_fetch_page_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let err = fetch_page(&url, Duration::from_secs(5)).await.unwrap_err();

    match err {
        ScraperError::FetchError(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(404)),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fetch_page_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let result = fetch_page(&server.uri(), Duration::from_millis(100)).await;

    assert!(matches!(result, Err(ScraperError::FetchError(e)) if e.is_timeout()));
}

#[tokio::test]
async fn test_fetch_content_rejects_empty_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let result = fetch_content(&server.uri(), Duration::from_secs(5)).await;

    assert!(matches!(result, Err(ScraperError::NoContent)));
}

#[tokio::test]
async fn test_fetch_content_extracts_title_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .mount(&server)
        .await;

    let content = fetch_content(&server.uri(), Duration::from_secs(5)).await.unwrap();

    assert_eq!(content.title.as_deref(), Some("Async Rust in Practice"));
    assert!(content.text.contains("Futures are lazy."));
    assert_eq!(content.url, server.uri());
}
