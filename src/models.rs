//! Record types produced by a crawl
//!
//! These are the shapes written into the JSON artifacts. `-1` in `year` or
//! `rating` marks a value that was missing or could not be parsed.

use serde::{Deserialize, Serialize};

/// Sentinel for a year that was not available
pub const UNKNOWN_YEAR: i32 = -1;

/// Sentinel for a rating that was not available
pub const UNKNOWN_RATING: f32 = -1.0;

/// One filmography entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f32,
}

impl Movie {
    /// Creates a movie with both numeric fields at their sentinels
    pub fn untitled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: UNKNOWN_YEAR,
            rating: UNKNOWN_RATING,
        }
    }
}

/// An actor as listed on the site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub imdb_id: String,
}

/// An actor together with the movies found in their filmography
///
/// Movies are kept in crawl order (page, then position on the page).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorMovies {
    pub actor: Actor,
    pub movies: Vec<Movie>,
}

/// Borrowed view of [`ActorMovies`] used when checkpointing
///
/// Serializes to the same JSON shape without cloning the accumulated movies.
#[derive(Debug, Serialize)]
pub struct ActorMoviesRef<'a> {
    pub actor: &'a Actor,
    pub movies: &'a [Movie],
}
