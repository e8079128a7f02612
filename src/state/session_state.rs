/// Session state definitions for tracking pagination progress
///
/// This module defines the states a page session moves through while it
/// walks one target's result pages.
use std::fmt;

/// Represents the current state of a page session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    // ===== Active States =====
    /// Page `n` has been requested and the session waits for its content
    FetchingPage(u32),

    /// Page `n` arrived and its records are being extracted and persisted
    ProcessingPage(u32),

    // ===== Terminal State =====
    /// The stop detector fired; no further pages will be requested
    Stopped,
}

impl SessionState {
    /// The state every session starts in
    pub const INITIAL: Self = Self::FetchingPage(1);

    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Returns the page number this state refers to, if any
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::FetchingPage(n) | Self::ProcessingPage(n) => Some(*n),
            Self::Stopped => None,
        }
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// ```text
    /// FetchingPage(n) -> ProcessingPage(n)
    /// ProcessingPage(n) -> FetchingPage(n + 1) | Stopped
    /// ```
    pub fn can_transition_to(&self, next: &Self) -> bool {
        match (self, next) {
            (Self::FetchingPage(a), Self::ProcessingPage(b)) => a == b,
            (Self::ProcessingPage(a), Self::FetchingPage(b)) => a.checked_add(1) == Some(*b),
            (Self::ProcessingPage(_), Self::Stopped) => true,
            _ => false,
        }
    }

    /// Short label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::FetchingPage(_) => "fetching",
            Self::ProcessingPage(_) => "processing",
            Self::Stopped => "stopped",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page() {
            Some(n) => write!(f, "{}({})", self.label(), n),
            None => write!(f, "{}", self.label()),
        }
    }
}
