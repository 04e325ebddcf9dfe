//! Node model for the exploration tree
//!
//! A `SearchNode` is one keyword exploration: the results of searching the
//! keyword, the follow-up keywords the backend suggested for it, and the
//! child explorations spawned from those follow-ups.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// Identity
// =============================================================================

/// Opaque node identity, unique across the whole forest
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Allocate a fresh identity (UUID v4)
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// Search results and sources
// =============================================================================

/// A single search result as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    #[serde(default)]
    pub title: String,

    /// Description snippet
    #[serde(default)]
    pub snippet: String,

    /// Page URL
    #[serde(default)]
    pub url: String,
}

impl SearchResult {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }
}

/// Search provider that produced a node's results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    /// General web search
    #[default]
    Baidu,
    /// CC98 forum search
    Cc98,
}

impl SearchSource {
    /// Wire name sent in `search_source`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchSource::Baidu => "baidu",
            SearchSource::Cc98 => "cc98",
        }
    }

    /// Human-readable provider label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SearchSource::Baidu => "Baidu search",
            SearchSource::Cc98 => "CC98 forum",
        }
    }
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a search source name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown search source '{0}' (expected 'baidu' or 'cc98')")]
pub struct UnknownSource(pub String);

impl FromStr for SearchSource {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baidu" => Ok(SearchSource::Baidu),
            "cc98" => Ok(SearchSource::Cc98),
            other => Err(UnknownSource(other.to_string())),
        }
    }
}

/// Content of one successful search: results plus follow-up keywords
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPayload {
    pub results: Vec<SearchResult>,
    pub generated_keywords: Vec<String>,
}

impl SearchPayload {
    #[must_use]
    pub fn new(results: Vec<SearchResult>, generated_keywords: Vec<String>) -> Self {
        Self {
            results,
            generated_keywords,
        }
    }
}

// =============================================================================
// Node
// =============================================================================

/// Request status of a node that is already in the forest
///
/// Nodes are only inserted after their first search succeeded, so there is
/// no "searching" or "failed" state here: a failed initial search never
/// produces a node at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// No request in flight
    #[default]
    Ready,
    /// A refresh of this node's own results is in flight
    Refreshing,
    /// A child search under this node is in flight
    Expanding,
}

/// One keyword exploration and its descendants
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    /// Stable identity, assigned at creation
    pub id: NodeId,

    /// Exploration term
    pub keyword: String,

    /// Results of the most recent successful search, replaced wholesale on refresh
    pub search_results: Vec<SearchResult>,

    /// Follow-up keywords, replaced wholesale on refresh
    pub generated_keywords: Vec<String>,

    /// Child explorations in insertion order (append-only)
    pub children: Vec<Arc<SearchNode>>,

    /// Time of the most recent successful search
    pub timestamp: DateTime<Utc>,

    /// Whether the full result list is shown
    pub is_expanded: bool,

    /// Provider that produced the results, fixed for the node's lifetime
    pub search_source: SearchSource,

    pub status: NodeStatus,
}

impl SearchNode {
    /// Create a node from a successful search
    #[must_use]
    pub fn new(keyword: impl Into<String>, source: SearchSource, payload: SearchPayload) -> Self {
        Self::new_at(keyword, source, payload, Utc::now())
    }

    /// Create a node from a successful search completed at `timestamp`
    #[must_use]
    pub fn new_at(
        keyword: impl Into<String>,
        source: SearchSource,
        payload: SearchPayload,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NodeId::generate(),
            keyword: keyword.into(),
            search_results: payload.results,
            generated_keywords: payload.generated_keywords,
            children: Vec::new(),
            timestamp,
            is_expanded: false,
            search_source: source,
            status: NodeStatus::Ready,
        }
    }

    /// True once at least one search completed; always true for forest nodes
    #[must_use]
    pub fn has_searched(&self) -> bool {
        true
    }

    /// True while a refresh or expand request is in flight for this node
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status != NodeStatus::Ready
    }

    /// Result at `index`, if any
    #[must_use]
    pub fn result(&self, index: usize) -> Option<&SearchResult> {
        self.search_results.get(index)
    }
}

impl Serialize for SearchNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchNode", 11)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("keyword", &self.keyword)?;
        state.serialize_field("searchResults", &self.search_results)?;
        state.serialize_field("generatedKeywords", &self.generated_keywords)?;
        state.serialize_field("children", &self.children)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("isExpanded", &self.is_expanded)?;
        state.serialize_field("hasSearched", &self.has_searched())?;
        state.serialize_field("isLoading", &self.is_loading())?;
        state.serialize_field("searchSource", &self.search_source)?;
        state.serialize_field("status", &self.status)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parsing_is_case_insensitive() {
        assert_eq!("CC98".parse::<SearchSource>(), Ok(SearchSource::Cc98));
        assert_eq!(" baidu ".parse::<SearchSource>(), Ok(SearchSource::Baidu));
        assert!("google".parse::<SearchSource>().is_err());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(NodeId::generate(), NodeId::generate());
    }

    #[test]
    fn test_node_serializes_camel_case_flags() {
        let node = SearchNode::new(
            "rust",
            SearchSource::Cc98,
            SearchPayload::new(vec![SearchResult::new("A", "s", "u")], vec!["x".into()]),
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["keyword"], "rust");
        assert_eq!(json["searchSource"], "cc98");
        assert_eq!(json["hasSearched"], true);
        assert_eq!(json["isLoading"], false);
        assert_eq!(json["searchResults"][0]["title"], "A");
        assert!(json["children"].as_array().unwrap().is_empty());
    }
}
