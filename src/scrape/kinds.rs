//! Crawl kinds
//!
//! A crawl kind bundles what differs between record types: the stop policy,
//! how records are pulled out of a page, and the shape of the artifact.

use crate::models::{Actor, ActorMoviesRef, Movie};
use crate::scrape::extract::{extract_actor, extract_movie};
use crate::scrape::page::{attr, child_text, static_selector, text_of, Page};
use crate::scrape::stop::StopPolicy;
use crate::scrape::ScrapeKind;
use crate::ScrapeError;
use scraper::Selector;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static HEADER: LazyLock<Selector> = LazyLock::new(|| static_selector(".article h1.header"));
static MOVIE_ROW: LazyLock<Selector> = LazyLock::new(|| static_selector(".lister-col-wrapper"));
static MOVIE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| static_selector(".col-title span[title] > a:first-child"));
static MOVIE_YEAR: LazyLock<Selector> =
    LazyLock::new(|| static_selector(".col-title span[title] > .lister-item-year"));
static MOVIE_RATING: LazyLock<Selector> =
    LazyLock::new(|| static_selector(".col-imdb-rating strong"));
static LIST_ACTOR: LazyLock<Selector> = LazyLock::new(|| static_selector(".lister-item-header a"));

/// Record-type specific behaviour of a page session
pub trait CrawlKind {
    /// One extracted record
    type Record: fmt::Debug;

    fn kind(&self) -> ScrapeKind;

    /// Decides whether a page is past the end of the results
    fn stop_policy(&self) -> &StopPolicy;

    /// Looks at page-level content outside the records
    ///
    /// Runs on every page that is not a stop page, before extraction.
    fn inspect(&mut self, _target_id: &str, _page: &Page) -> Result<(), ScrapeError> {
        Ok(())
    }

    /// Extracts every record on the page, in document order
    fn extract(&self, page: &Page) -> Vec<Self::Record>;

    /// The document persisted for the records accumulated so far
    fn artifact<'a>(&'a self, records: &'a [Self::Record]) -> impl Serialize + 'a;
}

/// An actor's filmography, one movie per search result row
#[derive(Debug, Clone)]
pub struct ActorMoviesKind {
    actor: Actor,
    stop: StopPolicy,
}

impl ActorMoviesKind {
    pub fn new(actor_id: &str) -> Self {
        Self {
            actor: Actor {
                name: String::new(),
                imdb_id: actor_id.trim().to_string(),
            },
            stop: StopPolicy::no_results(),
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}

impl CrawlKind for ActorMoviesKind {
    type Record = Movie;

    fn kind(&self) -> ScrapeKind {
        ScrapeKind::ActorMovies
    }

    fn stop_policy(&self) -> &StopPolicy {
        &self.stop
    }

    /// Reads the actor's name from the search header, once
    ///
    /// The header reads like `Titles With Al Pacino`; the name is whatever
    /// follows `With`.
    fn inspect(&mut self, target_id: &str, page: &Page) -> Result<(), ScrapeError> {
        if !self.actor.name.is_empty() {
            return Ok(());
        }

        let Some(header) = page.select(&HEADER).next().map(text_of) else {
            return Ok(());
        };

        let name = header
            .find("With")
            .map(|i| header[i + "With".len()..].trim())
            .ok_or_else(|| ScrapeError::ActorName {
                target: target_id.to_string(),
                header: header.clone(),
            })?;

        tracing::info!("Actor {} is {:?}", target_id, name);
        self.actor.name = name.to_string();
        Ok(())
    }

    fn extract(&self, page: &Page) -> Vec<Movie> {
        page.select(&MOVIE_ROW)
            .map(|row| {
                extract_movie(
                    &child_text(row, &MOVIE_TITLE),
                    &child_text(row, &MOVIE_YEAR),
                    &child_text(row, &MOVIE_RATING),
                )
            })
            .collect()
    }

    fn artifact<'a>(&'a self, records: &'a [Movie]) -> impl Serialize + 'a {
        ActorMoviesRef {
            actor: &self.actor,
            movies: records,
        }
    }
}

/// The actors on a user list
#[derive(Debug, Clone)]
pub struct ListActorsKind {
    stop: StopPolicy,
}

impl ListActorsKind {
    pub fn new() -> Self {
        Self {
            stop: StopPolicy::exhausted(LIST_ACTOR.clone()),
        }
    }
}

impl Default for ListActorsKind {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlKind for ListActorsKind {
    type Record = Actor;

    fn kind(&self) -> ScrapeKind {
        ScrapeKind::ListActors
    }

    fn stop_policy(&self) -> &StopPolicy {
        &self.stop
    }

    fn extract(&self, page: &Page) -> Vec<Actor> {
        page.select(&LIST_ACTOR)
            .map(|link| extract_actor(&text_of(link), attr(link, "href")))
            .collect()
    }

    fn artifact<'a>(&'a self, records: &'a [Actor]) -> impl Serialize + 'a {
        records
    }
}
