//! End-of-results detection
//!
//! Each crawl kind decides differently when it has run past the last page:
//! filmography searches render a "no results" sentinel item, while lists
//! simply render no entries.

use crate::scrape::page::{static_selector, Page};
use scraper::Selector;

/// Text the site renders in place of results past the last page
pub const NO_RESULTS_MESSAGE: &str =
    "No results. Try removing genres, ratings, or other filters to see more.";

/// Selector for the candidate items inspected for the sentinel
pub const ITEM_SELECTOR: &str = ".lister-item";

/// When a crawl should stop, given one fetched page
#[derive(Debug, Clone)]
pub enum StopPolicy {
    /// Stop iff any item's trimmed text equals `message` exactly
    Sentinel { items: Selector, message: String },

    /// Stop iff no record matches `records`
    Exhausted { records: Selector },
}

impl StopPolicy {
    /// The filmography-search policy: stop on the "no results" item
    pub fn no_results() -> Self {
        Self::Sentinel {
            items: static_selector(ITEM_SELECTOR),
            message: NO_RESULTS_MESSAGE.to_string(),
        }
    }

    /// Stop once `records` matches nothing
    pub fn exhausted(records: Selector) -> Self {
        Self::Exhausted { records }
    }

    /// Returns true if the page is past the end of the results
    pub fn should_stop(&self, page: &Page) -> bool {
        match self {
            Self::Sentinel { items, message } => sentinel_present(page.texts(items), message),
            Self::Exhausted { records } => is_exhausted(page.count(records)),
        }
    }
}

/// Returns true if any of `items` (already trimmed) equals `message`
pub fn sentinel_present<I, S>(items: I, message: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().any(|item| item.as_ref() == message)
}

/// Returns true if a page yielded no records
pub fn is_exhausted(record_count: usize) -> bool {
    record_count == 0
}
