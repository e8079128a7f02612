//! Page session - one target's pagination loop
//!
//! A session walks a target's result pages strictly in order:
//!
//! 1. Fetch page `n`
//! 2. Ask the stop policy whether the page is past the end; if so, stop
//!    and discard the page
//! 3. Extract every record in document order, checkpointing the artifact
//!    after each one (or once per page, per `PersistPolicy`)
//! 4. Move to page `n + 1`
//!
//! There is no page limit. A session ends when the stop policy fires or
//! the fetcher fails.

use crate::config::PersistPolicy;
use crate::output::SessionReport;
use crate::scrape::fetcher::Fetcher;
use crate::scrape::kinds::CrawlKind;
use crate::scrape::page::Page;
use crate::scrape::urls::UrlBuilder;
use crate::state::ScrapeSession;
use crate::storage::{artifact_key, PersistenceSink};
use crate::ScrapeError;
use chrono::Utc;

/// What happened to one processed page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Records were extracted and the next page should be fetched
    Continue { records: usize },

    /// The page was past the end of the results
    Stopped,
}

/// Drives one target's crawl from page 1 to the stop page
pub struct PageSession<'a, K: CrawlKind, F, S> {
    kind: K,
    session: ScrapeSession<K::Record>,
    urls: &'a UrlBuilder,
    fetcher: &'a F,
    sink: &'a S,
    persist: PersistPolicy,
    key: String,
    writes: usize,
    failed_writes: usize,
}

impl<'a, K, F, S> PageSession<'a, K, F, S>
where
    K: CrawlKind,
    F: Fetcher,
    S: PersistenceSink,
{
    /// Creates a session for `target_id`
    ///
    /// Fails with a configuration error if the target id is blank, before
    /// anything is fetched.
    pub fn start(
        target_id: &str,
        kind: K,
        urls: &'a UrlBuilder,
        fetcher: &'a F,
        sink: &'a S,
        persist: PersistPolicy,
    ) -> Result<Self, ScrapeError> {
        let session = ScrapeSession::new(target_id)?;
        let key = artifact_key(kind.kind(), session.target_id());

        Ok(Self {
            kind,
            session,
            urls,
            fetcher,
            sink,
            persist,
            key,
            writes: 0,
            failed_writes: 0,
        })
    }

    pub fn session(&self) -> &ScrapeSession<K::Record> {
        &self.session
    }

    /// Runs the session until the stop policy fires
    ///
    /// Transport errors end the session immediately; whatever was
    /// checkpointed before stays on disk.
    pub async fn run(mut self) -> Result<SessionReport, ScrapeError> {
        let started_at = Utc::now();
        let crawl_kind = self.kind.kind();

        tracing::info!(
            "Starting {} crawl for {} ({:?} writes)",
            crawl_kind,
            self.session.target_id(),
            self.persist
        );

        while !self.session.is_stopped() {
            let url = self
                .urls
                .page_url(crawl_kind, self.session.target_id(), self.session.page())?;

            let body = match self.fetcher.fetch(url.as_str()).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!(
                        "{} page {} failed after {} records: {}",
                        self.session.target_id(),
                        self.session.page(),
                        self.session.accumulated().len(),
                        e
                    );
                    return Err(e);
                }
            };

            self.process_page(&body)?;
        }

        let report = SessionReport {
            target_id: self.session.target_id().to_string(),
            kind: crawl_kind,
            artifact_key: self.key.clone(),
            pages: self.session.pages_processed(),
            records: self.session.accumulated().len(),
            writes: self.writes,
            failed_writes: self.failed_writes,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Finished {} {}: {} records over {} pages",
            crawl_kind,
            report.target_id,
            report.records,
            report.pages
        );

        Ok(report)
    }

    /// Processes one fetched page body
    ///
    /// The parsed document never outlives this call, so nothing parsed is
    /// held across the next fetch.
    pub fn process_page(&mut self, body: &str) -> Result<PageOutcome, ScrapeError> {
        self.session.begin_processing()?;
        let page = Page::parse(body);

        if self.kind.stop_policy().should_stop(&page) {
            tracing::info!(
                "{}: no more results on page {}",
                self.session.target_id(),
                self.session.page()
            );
            self.session.stop()?;
            return Ok(PageOutcome::Stopped);
        }

        self.kind.inspect(self.session.target_id(), &page)?;

        let records = self.kind.extract(&page);
        let count = records.len();
        tracing::debug!(
            "{} page {}: {} records",
            self.session.target_id(),
            self.session.page(),
            count
        );

        for record in records {
            self.session.push(record);
            if self.persist == PersistPolicy::PerRecord {
                self.checkpoint();
            }
        }

        if self.persist == PersistPolicy::PerPage && count > 0 {
            self.checkpoint();
        }

        self.session.advance()?;
        Ok(PageOutcome::Continue { records: count })
    }

    /// Writes everything accumulated so far; failures are logged, not raised
    fn checkpoint(&mut self) {
        let result = {
            let artifact = self.kind.artifact(self.session.accumulated());
            self.sink.save(&self.key, &artifact)
        };

        self.writes += 1;
        if let Err(e) = result {
            self.failed_writes += 1;
            tracing::error!(
                "Could not save {} ({} records in memory): {}",
                self.key,
                self.session.accumulated().len(),
                e
            );
        }
    }
}
