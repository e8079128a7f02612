//! State module for tracking crawl progress
//!
//! This module provides the pagination state carried through one target's crawl.
//!
//! # Components
//!
//! - `SessionState`: where the session is in its fetch/process/stop cycle
//! - `ScrapeSession`: the page counter, state and accumulated records for one target

mod scrape_session;
mod session_state;

// Re-export main types
pub use scrape_session::{validate_target_id, ScrapeSession};
pub use session_state::SessionState;
