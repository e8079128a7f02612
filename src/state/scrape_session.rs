//! Per-target pagination state
//!
//! A `ScrapeSession` is the value threaded through every step of one
//! target's crawl: which page comes next, whether the crawl has stopped, and
//! what has been collected so far.

use crate::state::SessionState;
use crate::{ConfigError, ScrapeError};

/// In-memory state for a single target's crawl
#[derive(Debug, Clone)]
pub struct ScrapeSession<R> {
    target_id: String,
    state: SessionState,
    accumulated: Vec<R>,
    pages_processed: u32,
}

impl<R> ScrapeSession<R> {
    /// Creates a session for `target_id`, starting at page 1
    ///
    /// The id must be non-blank and free of path separators because it is
    /// used to key the persisted artifact.
    pub fn new(target_id: &str) -> Result<Self, ConfigError> {
        let target_id = validate_target_id(target_id)?;

        Ok(Self {
            target_id: target_id.to_string(),
            state: SessionState::INITIAL,
            accumulated: Vec::new(),
            pages_processed: 0,
        })
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The page currently being fetched or processed
    ///
    /// Once stopped this is the last page that was processed.
    pub fn page(&self) -> u32 {
        self.state.page().unwrap_or(self.pages_processed)
    }

    /// Number of pages that reached processing, including the stop page
    pub fn pages_processed(&self) -> u32 {
        self.pages_processed
    }

    pub fn is_stopped(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn accumulated(&self) -> &[R] {
        &self.accumulated
    }

    /// Marks the fetched page as arrived and under processing
    pub fn begin_processing(&mut self) -> Result<(), ScrapeError> {
        let page = self.page();
        self.transition(SessionState::ProcessingPage(page))?;
        self.pages_processed += 1;
        Ok(())
    }

    /// Appends one extracted record
    pub fn push(&mut self, record: R) {
        self.accumulated.push(record);
    }

    /// Moves on to the next page
    pub fn advance(&mut self) -> Result<u32, ScrapeError> {
        let next = self.page() + 1;
        self.transition(SessionState::FetchingPage(next))?;
        Ok(next)
    }

    /// Ends the session
    pub fn stop(&mut self) -> Result<(), ScrapeError> {
        self.transition(SessionState::Stopped)
    }

    fn transition(&mut self, to: SessionState) -> Result<(), ScrapeError> {
        if !self.state.can_transition_to(&to) {
            return Err(ScrapeError::InvalidTransition {
                from: self.state,
                to,
            });
        }

        tracing::trace!("{}: {} -> {}", self.target_id, self.state, to);
        self.state = to;
        Ok(())
    }
}

/// Validates a target identifier, returning it trimmed
pub fn validate_target_id(target_id: &str) -> Result<&str, ConfigError> {
    let trimmed = target_id.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::InvalidTarget(target_id.to_string()));
    }

    let unsafe_char = |c: char| matches!(c, '/' | '\\' | '?' | '#') || c.is_whitespace();
    if trimmed.contains(unsafe_char) || trimmed == "." || trimmed == ".." {
        return Err(ConfigError::InvalidTarget(target_id.to_string()));
    }

    Ok(trimmed)
}
