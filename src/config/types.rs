//! Core configuration types for the exploration session
//!
//! This module contains the main `ExplorerConfig` struct and the on-disk
//! file format it can be loaded from.

use serde::{Deserialize, Serialize};

use crate::tree::SearchSource;

/// Main configuration struct for a search-tree session
///
/// Built only through the builder or [`ExplorerConfig::from_json_str`], both
/// of which validate. Serialize-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerConfig {
    /// Base URL of the search backend.
    ///
    /// **INVARIANT:** Always an absolute http(s) URL (validated in builder).
    pub(crate) backend_url: String,

    /// Per-request timeout in seconds
    pub(crate) request_timeout_secs: u64,

    /// Results requested by an initial search or a refresh
    pub(crate) initial_max_results: u32,
    /// Follow-up keywords requested by an initial search or a refresh
    pub(crate) initial_keyword_count: u32,

    /// Results requested when expanding a node
    pub(crate) expand_max_results: u32,
    /// Follow-up keywords requested when expanding a node
    pub(crate) expand_keyword_count: u32,

    /// `max_length` passed to the summarization endpoint
    pub(crate) summary_max_length: u32,

    /// Provider used for new root searches unless the caller picks one
    pub(crate) default_source: SearchSource,

    /// Buffered session events per subscriber
    pub(crate) event_capacity: usize,
}

/// JSON file format; every field but `backend_url` is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ExplorerConfigFile {
    pub backend_url: String,
    pub request_timeout_secs: Option<u64>,
    pub initial_max_results: Option<u32>,
    pub initial_keyword_count: Option<u32>,
    pub expand_max_results: Option<u32>,
    pub expand_keyword_count: Option<u32>,
    pub summary_max_length: Option<u32>,
    pub default_source: Option<SearchSource>,
    pub event_capacity: Option<usize>,
}
