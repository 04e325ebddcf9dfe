//! Getter methods and file loading for `ExplorerConfig`

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use super::types::{ExplorerConfig, ExplorerConfigFile};
use crate::tree::SearchSource;

impl ExplorerConfig {
    #[must_use]
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn initial_max_results(&self) -> u32 {
        self.initial_max_results
    }

    #[must_use]
    pub fn initial_keyword_count(&self) -> u32 {
        self.initial_keyword_count
    }

    #[must_use]
    pub fn expand_max_results(&self) -> u32 {
        self.expand_max_results
    }

    #[must_use]
    pub fn expand_keyword_count(&self) -> u32 {
        self.expand_keyword_count
    }

    #[must_use]
    pub fn summary_max_length(&self) -> u32 {
        self.summary_max_length
    }

    #[must_use]
    pub fn default_source(&self) -> SearchSource {
        self.default_source
    }

    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Load and validate a JSON config file
    ///
    /// Fields missing from the file keep their builder defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, has unknown
    /// fields, or holds values the builder rejects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse and validate a JSON config document
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or values the builder rejects.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: ExplorerConfigFile =
            serde_json::from_str(raw).context("Failed to parse config JSON")?;

        let mut builder = Self::builder().backend_url(file.backend_url);
        if let Some(secs) = file.request_timeout_secs {
            builder = builder.request_timeout_secs(secs);
        }
        if file.initial_max_results.is_some() || file.initial_keyword_count.is_some() {
            let max_results = file.initial_max_results.unwrap_or(builder.initial_max_results);
            let keyword_count = file
                .initial_keyword_count
                .unwrap_or(builder.initial_keyword_count);
            builder = builder.initial_sizes(max_results, keyword_count);
        }
        if file.expand_max_results.is_some() || file.expand_keyword_count.is_some() {
            let max_results = file.expand_max_results.unwrap_or(builder.expand_max_results);
            let keyword_count = file
                .expand_keyword_count
                .unwrap_or(builder.expand_keyword_count);
            builder = builder.expand_sizes(max_results, keyword_count);
        }
        if let Some(length) = file.summary_max_length {
            builder = builder.summary_max_length(length);
        }
        if let Some(source) = file.default_source {
            builder = builder.default_source(source);
        }
        if let Some(capacity) = file.event_capacity {
            builder = builder.event_capacity(capacity);
        }
        builder.build()
    }
}
