//! Type-safe builder for `ExplorerConfig` using the typestate pattern
//!
//! `build()` only exists once the backend URL has been supplied.

use crate::tree::SearchSource;
use crate::utils::{
    EVENT_CHANNEL_CAPACITY, EXPAND_KEYWORD_COUNT, EXPAND_MAX_RESULTS, INITIAL_KEYWORD_COUNT,
    INITIAL_MAX_RESULTS, REQUEST_TIMEOUT_SECS, SUMMARY_MAX_LENGTH,
};
use anyhow::{Result, anyhow, bail};
use std::marker::PhantomData;
use url::Url;

use super::types::ExplorerConfig;

// Type states for the builder
pub struct WithBackendUrl;

pub struct ExplorerConfigBuilder<State = ()> {
    pub(crate) backend_url: Option<String>,
    pub(crate) request_timeout_secs: u64,
    pub(crate) initial_max_results: u32,
    pub(crate) initial_keyword_count: u32,
    pub(crate) expand_max_results: u32,
    pub(crate) expand_keyword_count: u32,
    pub(crate) summary_max_length: u32,
    pub(crate) default_source: SearchSource,
    pub(crate) event_capacity: usize,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ExplorerConfigBuilder<()> {
    fn default() -> Self {
        Self {
            backend_url: None,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            initial_max_results: INITIAL_MAX_RESULTS,
            initial_keyword_count: INITIAL_KEYWORD_COUNT,
            expand_max_results: EXPAND_MAX_RESULTS,
            expand_keyword_count: EXPAND_KEYWORD_COUNT,
            summary_max_length: SUMMARY_MAX_LENGTH,
            default_source: SearchSource::default(),
            event_capacity: EVENT_CHANNEL_CAPACITY,
            _phantom: PhantomData,
        }
    }
}

impl ExplorerConfig {
    #[must_use]
    pub fn builder() -> ExplorerConfigBuilder<()> {
        ExplorerConfigBuilder::default()
    }
}

impl ExplorerConfigBuilder<()> {
    pub fn backend_url(self, url: impl Into<String>) -> ExplorerConfigBuilder<WithBackendUrl> {
        ExplorerConfigBuilder {
            backend_url: Some(url.into()),
            request_timeout_secs: self.request_timeout_secs,
            initial_max_results: self.initial_max_results,
            initial_keyword_count: self.initial_keyword_count,
            expand_max_results: self.expand_max_results,
            expand_keyword_count: self.expand_keyword_count,
            summary_max_length: self.summary_max_length,
            default_source: self.default_source,
            event_capacity: self.event_capacity,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the backend URL is set
impl ExplorerConfigBuilder<WithBackendUrl> {
    pub fn build(self) -> Result<ExplorerConfig> {
        let backend_url = self
            .backend_url
            .ok_or_else(|| anyhow!("backend_url is required"))?;
        let backend_url = backend_url.trim().to_string();

        let parsed = Url::parse(&backend_url)
            .map_err(|e| anyhow!("Invalid backend URL '{backend_url}': {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "Backend URL must use http or https, got '{}'",
                parsed.scheme()
            );
        }

        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        for (name, value) in [
            ("initial_max_results", self.initial_max_results),
            ("initial_keyword_count", self.initial_keyword_count),
            ("expand_max_results", self.expand_max_results),
            ("expand_keyword_count", self.expand_keyword_count),
            ("summary_max_length", self.summary_max_length),
        ] {
            if value == 0 {
                bail!("{name} must be greater than zero");
            }
        }
        if self.event_capacity == 0 {
            bail!("event_capacity must be greater than zero");
        }

        Ok(ExplorerConfig {
            backend_url,
            request_timeout_secs: self.request_timeout_secs,
            initial_max_results: self.initial_max_results,
            initial_keyword_count: self.initial_keyword_count,
            expand_max_results: self.expand_max_results,
            expand_keyword_count: self.expand_keyword_count,
            summary_max_length: self.summary_max_length,
            default_source: self.default_source,
            event_capacity: self.event_capacity,
        })
    }
}
