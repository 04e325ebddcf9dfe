//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use super::builder::ExplorerConfigBuilder;
use crate::tree::SearchSource;

impl<State> ExplorerConfigBuilder<State> {
    /// Per-request timeout against the backend, in seconds
    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Page sizes used by initial searches and refreshes
    ///
    /// # Arguments
    /// * `max_results` - Results per search (default: 5)
    /// * `keyword_count` - Follow-up keywords per search (default: 5)
    #[must_use]
    pub fn initial_sizes(mut self, max_results: u32, keyword_count: u32) -> Self {
        self.initial_max_results = max_results;
        self.initial_keyword_count = keyword_count;
        self
    }

    /// Page sizes used when expanding a node into a child search
    ///
    /// # Arguments
    /// * `max_results` - Results per child search (default: 3)
    /// * `keyword_count` - Follow-up keywords per child search (default: 3)
    #[must_use]
    pub fn expand_sizes(mut self, max_results: u32, keyword_count: u32) -> Self {
        self.expand_max_results = max_results;
        self.expand_keyword_count = keyword_count;
        self
    }

    #[must_use]
    pub fn summary_max_length(mut self, length: u32) -> Self {
        self.summary_max_length = length;
        self
    }

    #[must_use]
    pub fn default_source(mut self, source: SearchSource) -> Self {
        self.default_source = source;
        self
    }

    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}
