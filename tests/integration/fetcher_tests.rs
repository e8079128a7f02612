//! HTTP fetcher behaviour against a mock server

use crate::common::config_for;
use reel_harvest::scrape::{Fetcher, HttpFetcher};
use reel_harvest::ScrapeError;
use tempfile::TempDir;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_sends_accept_language() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&server, dir.path());
    config.fetcher.accept_language = "ro-RO".to_string();

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("accept-language", "ro-RO"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&config).unwrap();
    let body = fetcher
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn test_default_language_header_present() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, dir.path());

    Mock::given(method("GET"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&config).unwrap();
    assert!(fetcher.fetch(&server.uri()).await.is_ok());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, dir.path());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&config).unwrap();
    let err = fetcher
        .fetch(&format!("{}/filmosearch/", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_missing_page_is_reported() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, dir.path());

    let fetcher = HttpFetcher::new(&config).unwrap();
    let err = fetcher
        .fetch(&format!("{}/nothing-here", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_disallowed_domain_never_requested() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&server, dir.path());
    config.site.allowed_domains = vec!["www.imdb.com".to_string()];

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&config).unwrap();
    let err = fetcher.fetch(&server.uri()).await.unwrap_err();

    assert!(matches!(err, ScrapeError::DisallowedDomain { .. }));
}
