//! Full single-target crawls through the HTTP fetcher and JSON file sink

use crate::common::{
    config_for, filmography_page, list_page, mount_filmography, mount_list, no_results_page,
};
use reel_harvest::config::PersistPolicy;
use reel_harvest::models::{Actor, ActorMovies};
use reel_harvest::scrape::{self, RunSummary, ScrapeKind, ScrapeRequest};
use reel_harvest::ScrapeError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::MockServer;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let content = std::fs::read_to_string(path).expect("artifact should exist");
    serde_json::from_str(&content).expect("artifact should be valid JSON")
}

fn single(kind: ScrapeKind, id: &str) -> ScrapeRequest {
    ScrapeRequest::new(kind, Some(id), None).unwrap()
}

#[tokio::test]
async fn test_actor_movies_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, dir.path());

    mount_filmography(
        &server,
        "nm0000199",
        vec![
            filmography_page(
                "Al Pacino",
                &[
                    ("The Godfather", "(1972)", "9.2"),
                    ("Serpico", "(1973)", "7.7"),
                    ("Untitled Project", "", ""),
                ],
            ),
            filmography_page("Al Pacino", &[("Heat", "(1995)", "8.3")]),
            no_results_page("Al Pacino"),
        ],
    )
    .await;

    let summary = scrape::run(&config, &single(ScrapeKind::ActorMovies, "nm0000199"))
        .await
        .unwrap();

    let RunSummary::Single(report) = summary else {
        panic!("expected a single-target summary");
    };
    assert_eq!(report.records, 4);
    assert_eq!(report.pages, 3);
    assert_eq!(report.writes, 4);
    assert_eq!(report.failed_writes, 0);

    let artifact: ActorMovies =
        read_json(&dir.path().join("actormovies/actormovies-nm0000199.json"));
    assert_eq!(artifact.actor.name, "Al Pacino");
    assert_eq!(artifact.actor.imdb_id, "nm0000199");

    let titles: Vec<&str> = artifact.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["The Godfather", "Serpico", "Untitled Project", "Heat"]
    );
    assert_eq!(artifact.movies[0].year, 1972);
    assert!((artifact.movies[0].rating - 9.2).abs() < 1e-6);
    assert_eq!(artifact.movies[2].year, -1);
    assert_eq!(artifact.movies[2].rating, -1.0);

    // Page 4 is never requested once page 3 shows the sentinel
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_per_page_writes() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&server, dir.path());
    config.output.persist = PersistPolicy::PerPage;

    mount_filmography(
        &server,
        "nm0000174",
        vec![
            filmography_page(
                "Val Kilmer",
                &[("Top Gun", "(1986)", "6.9"), ("Heat", "(1995)", "8.3")],
            ),
            filmography_page("Val Kilmer", &[("Tombstone", "(1993)", "7.8")]),
            no_results_page("Val Kilmer"),
        ],
    )
    .await;

    let summary = scrape::run(&config, &single(ScrapeKind::ActorMovies, "nm0000174"))
        .await
        .unwrap();

    let RunSummary::Single(report) = summary else {
        panic!("expected a single-target summary");
    };
    assert_eq!(report.records, 3);
    assert_eq!(report.writes, 2);

    let artifact: ActorMovies =
        read_json(&dir.path().join("actormovies/actormovies-nm0000174.json"));
    assert_eq!(artifact.movies.len(), 3);
}

#[tokio::test]
async fn test_empty_filmography_writes_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, dir.path());

    mount_filmography(&server, "nm0000001", vec![no_results_page("Nobody")]).await;

    let summary = scrape::run(&config, &single(ScrapeKind::ActorMovies, "nm0000001"))
        .await
        .unwrap();

    let RunSummary::Single(report) = summary else {
        panic!("expected a single-target summary");
    };
    assert_eq!(report.records, 0);
    assert_eq!(report.pages, 1);
    assert!(!dir
        .path()
        .join("actormovies/actormovies-nm0000001.json")
        .exists());
}

#[tokio::test]
async fn test_fetch_failure_keeps_checkpoint() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, dir.path());

    // Only page 1 is mounted; page 2 gets the mock server's 404
    mount_filmography(
        &server,
        "nm0000199",
        vec![filmography_page(
            "Al Pacino",
            &[("The Godfather", "(1972)", "9.2"), ("Serpico", "(1973)", "7.7")],
        )],
    )
    .await;

    let err = scrape::run(&config, &single(ScrapeKind::ActorMovies, "nm0000199"))
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 404, .. }));

    let artifact: ActorMovies =
        read_json(&dir.path().join("actormovies/actormovies-nm0000199.json"));
    assert_eq!(artifact.movies.len(), 2);
}

#[tokio::test]
async fn test_list_actors_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, dir.path());

    mount_list(
        &server,
        "ls000004615",
        vec![
            list_page(&[("Al Pacino", "nm0000199"), ("Val Kilmer", "nm0000174")]),
            list_page(&[("Robert De Niro", "nm0000134")]),
            list_page(&[]),
        ],
    )
    .await;

    let summary = scrape::run(&config, &single(ScrapeKind::ListActors, "ls000004615"))
        .await
        .unwrap();

    let RunSummary::Single(report) = summary else {
        panic!("expected a single-target summary");
    };
    assert_eq!(report.records, 3);
    assert_eq!(report.pages, 3);

    let actors: Vec<Actor> = read_json(&dir.path().join("listactors/listactors-ls000004615.json"));
    assert_eq!(
        actors,
        vec![
            Actor {
                name: "Al Pacino".to_string(),
                imdb_id: "nm0000199".to_string()
            },
            Actor {
                name: "Val Kilmer".to_string(),
                imdb_id: "nm0000174".to_string()
            },
            Actor {
                name: "Robert De Niro".to_string(),
                imdb_id: "nm0000134".to_string()
            },
        ]
    );
}
