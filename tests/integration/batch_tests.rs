//! Batch crawls: ordering, failure policies, and feeding a list artifact
//! into a batch

use crate::common::{
    config_for, filmography_page, list_page, mount_filmography, mount_list, no_results_page,
};
use reel_harvest::config::FailurePolicy;
use reel_harvest::models::ActorMovies;
use reel_harvest::scrape::{self, RunSummary, ScrapeKind, ScrapeRequest};
use reel_harvest::ScrapeError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_targets(dir: &Path, ids: &[&str]) -> PathBuf {
    let actors: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "name": format!("Actor {}", id), "imdb_id": id }))
        .collect();
    let file = dir.join("targets.json");
    std::fs::write(&file, serde_json::to_string(&actors).unwrap()).unwrap();
    file
}

fn batch(file: PathBuf) -> ScrapeRequest {
    ScrapeRequest::new(ScrapeKind::ManyActorMovies, None, Some(file)).unwrap()
}

async fn mount_actor(server: &MockServer, id: &str, name: &str, titles: &[&str]) {
    let rows: Vec<(&str, &str, &str)> = titles.iter().map(|t| (*t, "(2000)", "7.0")).collect();
    mount_filmography(
        server,
        id,
        vec![filmography_page(name, &rows), no_results_page(name)],
    )
    .await;
}

async fn mount_broken_actor(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path("/filmosearch/"))
        .and(query_param("role", id))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

fn requested_roles(requests: &[wiremock::Request]) -> Vec<String> {
    requests
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "role")
                .map(|(_, v)| v.into_owned())
        })
        .collect()
}

#[tokio::test]
async fn test_batch_runs_targets_in_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir.path().join("out"));

    mount_actor(&server, "nm0000199", "Al Pacino", &["Heat", "Serpico"]).await;
    mount_actor(&server, "nm0000174", "Val Kilmer", &["Top Gun"]).await;

    let file = write_targets(dir.path(), &["nm0000199", "nm0000174"]);
    let summary = scrape::run(&config, &batch(file)).await.unwrap();

    let RunSummary::Batch(report) = summary else {
        panic!("expected a batch summary");
    };
    assert!(report.is_clean());
    assert_eq!(report.completed.len(), 2);
    assert_eq!(report.completed[0].target_id, "nm0000199");
    assert_eq!(report.completed[1].target_id, "nm0000174");
    assert_eq!(report.total_records(), 3);

    // Every request for the first target precedes every request for the second
    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requested_roles(&requests),
        vec!["nm0000199", "nm0000199", "nm0000174", "nm0000174"]
    );

    let out = dir.path().join("out/actormovies");
    let pacino: ActorMovies = serde_json::from_str(
        &std::fs::read_to_string(out.join("actormovies-nm0000199.json")).unwrap(),
    )
    .unwrap();
    let kilmer: ActorMovies = serde_json::from_str(
        &std::fs::read_to_string(out.join("actormovies-nm0000174.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(pacino.actor.name, "Al Pacino");
    assert_eq!(pacino.movies.len(), 2);
    assert_eq!(kilmer.actor.name, "Val Kilmer");
    assert_eq!(kilmer.movies.len(), 1);
}

#[tokio::test]
async fn test_batch_aborts_on_first_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&server, &dir.path().join("out"));
    config.batch.on_failure = FailurePolicy::Abort;

    mount_actor(&server, "nm1", "First", &["One"]).await;
    mount_broken_actor(&server, "nm2").await;
    mount_actor(&server, "nm3", "Third", &["Three"]).await;

    let file = write_targets(dir.path(), &["nm1", "nm2", "nm3"]);
    let err = scrape::run(&config, &batch(file)).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 500, .. }));

    let requests = server.received_requests().await.unwrap();
    assert!(!requested_roles(&requests).contains(&"nm3".to_string()));
    assert!(dir
        .path()
        .join("out/actormovies/actormovies-nm1.json")
        .exists());
}

#[tokio::test]
async fn test_batch_continues_past_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&server, &dir.path().join("out"));
    config.batch.on_failure = FailurePolicy::Continue;

    mount_actor(&server, "nm1", "First", &["One"]).await;
    mount_broken_actor(&server, "nm2").await;
    mount_actor(&server, "nm3", "Third", &["Three", "Four"]).await;

    let file = write_targets(dir.path(), &["nm1", "nm2", "nm3"]);
    let summary = scrape::run(&config, &batch(file)).await.unwrap();

    let RunSummary::Batch(report) = summary else {
        panic!("expected a batch summary");
    };
    assert!(!report.is_clean());
    assert_eq!(report.completed.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].target_id, "nm2");
    assert_eq!(report.total_records(), 3);
}

#[tokio::test]
async fn test_bad_batch_file_fails_before_fetching() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir.path().join("out"));

    let file = dir.path().join("targets.json");
    std::fs::write(&file, "not json").unwrap();

    let err = scrape::run(&config, &batch(file)).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Config(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_artifact_feeds_batch() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir.path().join("out"));

    mount_list(
        &server,
        "ls1",
        vec![
            list_page(&[("Al Pacino", "nm0000199"), ("Val Kilmer", "nm0000174")]),
            list_page(&[]),
        ],
    )
    .await;
    mount_actor(&server, "nm0000199", "Al Pacino", &["Heat"]).await;
    mount_actor(&server, "nm0000174", "Val Kilmer", &["Heat"]).await;

    let list = ScrapeRequest::new(ScrapeKind::ListActors, Some("ls1"), None).unwrap();
    scrape::run(&config, &list).await.unwrap();

    let file = dir.path().join("out/listactors/listactors-ls1.json");
    let summary = scrape::run(&config, &batch(file)).await.unwrap();

    let RunSummary::Batch(report) = summary else {
        panic!("expected a batch summary");
    };
    let ids: Vec<&str> = report
        .completed
        .iter()
        .map(|r| r.target_id.as_str())
        .collect();
    assert_eq!(ids, vec!["nm0000199", "nm0000174"]);
}
