//! Shared configuration constants for searchtree
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Results requested for an initial search and for a refresh
///
/// Root searches and refreshes ask for the wider page of results.
pub const INITIAL_MAX_RESULTS: u32 = 5;

/// Follow-up keywords requested for an initial search and for a refresh
pub const INITIAL_KEYWORD_COUNT: u32 = 5;

/// Results requested when expanding a node into a child search
///
/// Child searches are narrower than root searches (3 vs 5).
pub const EXPAND_MAX_RESULTS: u32 = 3;

/// Follow-up keywords requested when expanding a node
pub const EXPAND_KEYWORD_COUNT: u32 = 3;

/// Default summary length passed to the summarization endpoint
pub const SUMMARY_MAX_LENGTH: u32 = 200;

/// Default per-request timeout against the backend (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default backend base URL
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Maximum keyword length accepted by the session (characters)
pub const MAX_KEYWORD_LENGTH: usize = 200;

/// Buffered session events before slow subscribers start lagging
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Number of collected items shown before the "N more" remainder
pub const LEDGER_PREVIEW_LIMIT: usize = 3;
