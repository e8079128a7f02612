//! Field extraction for movie and actor records
//!
//! Turns the raw strings pulled from one record fragment into a normalized
//! record. Missing or malformed numbers never fail a record: the field keeps
//! its `-1` sentinel and the problem is reported alongside the result.

use crate::models::{Actor, Movie};
use regex::Regex;
use std::num::{ParseFloatError, ParseIntError};
use std::sync::LazyLock;
use thiserror::Error;

// ASCII only; `\d` would also match other scripts' digits
static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static NAME_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"nm[0-9]+").unwrap());

/// A numeric field that could not be parsed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldParseError {
    #[error("cannot convert year {digits:?} to i32: {source}")]
    Year {
        digits: String,
        source: ParseIntError,
    },

    #[error("cannot convert rating {raw:?} to f32: {source}")]
    Rating { raw: String, source: ParseFloatError },

    #[error("rating {raw:?} is not a finite number")]
    NonFiniteRating { raw: String },
}

/// Parses the year from raw text such as `"(1998)"` or `"(2004 TV Movie)"`
///
/// Uses the first run of decimal digits. Returns `Ok(None)` when the text
/// contains no digits.
pub fn parse_year(raw: &str) -> Result<Option<i32>, FieldParseError> {
    let Some(digits) = FIRST_NUMBER.find(raw) else {
        return Ok(None);
    };

    digits
        .as_str()
        .parse::<i32>()
        .map(Some)
        .map_err(|source| FieldParseError::Year {
            digits: digits.as_str().to_string(),
            source,
        })
}

/// Parses a rating such as `"7.9"`
///
/// Returns `Ok(None)` for empty text.
pub fn parse_rating(raw: &str) -> Result<Option<f32>, FieldParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let rating = trimmed
        .parse::<f32>()
        .map_err(|source| FieldParseError::Rating {
            raw: trimmed.to_string(),
            source,
        })?;

    if !rating.is_finite() {
        return Err(FieldParseError::NonFiniteRating {
            raw: trimmed.to_string(),
        });
    }

    Ok(Some(rating))
}

/// Builds a movie and collects any field errors instead of logging them
pub fn extract_movie_checked(
    title: &str,
    year_text: &str,
    rating_text: &str,
) -> (Movie, Vec<FieldParseError>) {
    let mut movie = Movie::untitled(title.trim());
    let mut errors = Vec::new();

    match parse_year(year_text) {
        Ok(Some(year)) => movie.year = year,
        Ok(None) => {}
        Err(e) => errors.push(e),
    }

    match parse_rating(rating_text) {
        Ok(Some(rating)) => movie.rating = rating,
        Ok(None) => {}
        Err(e) => errors.push(e),
    }

    (movie, errors)
}

/// Builds a movie from the raw text of one record fragment
///
/// Field errors are logged and leave the field at `-1`.
pub fn extract_movie(title: &str, year_text: &str, rating_text: &str) -> Movie {
    let (movie, errors) = extract_movie_checked(title, year_text, rating_text);
    for error in &errors {
        tracing::warn!("{:?}: {}", movie.title, error);
    }
    movie
}

/// Builds an actor from a list entry's link text and `href`
///
/// The id is the first `nm<digits>` in the href, or empty if there is none.
pub fn extract_actor(name_text: &str, href: Option<&str>) -> Actor {
    let imdb_id = href
        .and_then(|h| NAME_ID.find(h))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    if imdb_id.is_empty() {
        tracing::debug!("No name id in link for {:?}", name_text.trim());
    }

    Actor {
        name: name_text.trim().to_string(),
        imdb_id,
    }
}
