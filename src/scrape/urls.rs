//! Page URL construction
//!
//! Builds the URL for page `n` of a target from the site base URL and the
//! configured filmography query parameters.

use crate::config::{Config, FilmographyConfig};
use crate::scrape::ScrapeKind;
use crate::ScrapeError;
use url::{ParseError, Url};

/// Builds page URLs for every crawl kind
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
    filmography: FilmographyConfig,
}

impl UrlBuilder {
    pub fn new(base_url: &str, filmography: FilmographyConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            base: Url::parse(base_url)?,
            filmography,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        Self::new(&config.site.base_url, config.filmography.clone())
    }

    /// URL of page `page` for `target_id`
    pub fn page_url(
        &self,
        kind: ScrapeKind,
        target_id: &str,
        page: u32,
    ) -> Result<Url, ScrapeError> {
        match kind {
            ScrapeKind::ActorMovies | ScrapeKind::ManyActorMovies => {
                self.filmography_url(target_id, page)
            }
            ScrapeKind::ListActors => self.list_url(target_id, page),
        }
    }

    /// Filmography search for one actor, sorted and filtered per config
    pub fn filmography_url(&self, actor_id: &str, page: u32) -> Result<Url, ScrapeError> {
        let mut url = self.base.join("/filmosearch/")?;
        let sort = format!("{},{}", self.filmography.sort, self.filmography.sort_order);

        url.query_pairs_mut()
            .append_pair("explore", "title_type")
            .append_pair("role", actor_id)
            .append_pair("ref_", "filmo_nxt")
            .append_pair("mode", "simple")
            .append_pair("page", &page.to_string())
            .append_pair("sort", &sort)
            .append_pair("title_type", &self.filmography.title_type);

        Ok(url)
    }

    /// Detail view of a user list, in list order
    ///
    /// The list id is percent-encoded as a single path segment.
    pub fn list_url(&self, list_id: &str, page: u32) -> Result<Url, ScrapeError> {
        let mut url = self.base.join("/list/")?;
        url.path_segments_mut()
            .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(list_id)
            .push("");

        url.query_pairs_mut()
            .append_pair("sort", "list_order,asc")
            .append_pair("mode", "detail")
            .append_pair("page", &page.to_string());

        Ok(url)
    }
}
