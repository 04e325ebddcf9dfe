//! Wire types for the search / keyword-generation / summarization backend

use serde::{Deserialize, Serialize};

use super::errors::BackendError;
use crate::tree::{SearchPayload, SearchResult, SearchSource};

// =============================================================================
// Endpoint paths
// =============================================================================

pub const SEARCH_PATH: &str = "search";
pub const SUMMARIZE_PATH: &str = "summarize";
pub const INTEGRATE_PATH: &str = "integrate";
pub const INTEGRATE_TREE_PATH: &str = "integrate-tree";
pub const HEALTH_PATH: &str = "health";

// =============================================================================
// Search
// =============================================================================

/// Body of `POST /search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
    pub max_results: u32,
    pub generate_keywords_count: u32,
    pub search_source: SearchSource,
}

impl SearchRequest {
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        max_results: u32,
        generate_keywords_count: u32,
        search_source: SearchSource,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            max_results,
            generate_keywords_count,
            search_source,
        }
    }
}

/// Response of `POST /search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub original_keyword: String,
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
    #[serde(default)]
    pub generated_keywords: Vec<String>,
    #[serde(default)]
    pub message: String,
}

impl SearchResponse {
    /// Results and follow-ups, or the backend's own failure message
    pub fn into_payload(self) -> Result<SearchPayload, BackendError> {
        if self.success {
            Ok(SearchPayload::new(self.search_results, self.generated_keywords))
        } else {
            Err(BackendError::Rejected {
                message: self.message,
            })
        }
    }
}

// =============================================================================
// Summarization
// =============================================================================

/// Body of `POST /summarize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub content: String,
    pub max_length: u32,
}

/// Response of `POST /summarize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub success: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub message: String,
}

impl SummarizeResponse {
    pub fn into_summary(self) -> Result<String, BackendError> {
        if self.success {
            Ok(self.summary)
        } else {
            Err(BackendError::Rejected {
                message: self.message,
            })
        }
    }
}

// =============================================================================
// Integration
// =============================================================================

/// One titled piece of content to merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationContent {
    pub title: String,
    pub content: String,
}

/// Body of `POST /integrate` (collected items)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrateRequest {
    pub contents: Vec<IntegrationContent>,
    pub keyword: String,
}

/// A node of the tree as sent to `POST /integrate-tree`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeIntegrationNode {
    pub keyword: String,
    pub results: Vec<IntegrationContent>,
}

/// Body of `POST /integrate-tree`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeIntegrationRequest {
    pub nodes: Vec<TreeIntegrationNode>,
    pub main_keyword: String,
}

/// Response of both integration endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationResponse {
    pub success: bool,
    #[serde(default)]
    pub integration: String,
    #[serde(default)]
    pub message: String,
}

impl IntegrationResponse {
    pub fn into_text(self) -> Result<String, BackendError> {
        if self.success {
            Ok(self.integration)
        } else {
            Err(BackendError::Rejected {
                message: self.message,
            })
        }
    }
}

// =============================================================================
// Health
// =============================================================================

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
