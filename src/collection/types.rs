//! Data structures for collected results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tree::{NodeId, SearchNode};

/// Identity of a collected item, derived from its origin `(node, result index)`
///
/// The same source result always maps to the same id, which is what makes
/// collecting idempotent. Indices refer to the origin node's results at
/// collection time; a later refresh may put different content at that index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    #[must_use]
    pub fn derive(node_id: &NodeId, result_index: usize) -> Self {
        Self(format!("{node_id}-{result_index}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of one search result the user chose to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedItem {
    pub id: CollectionId,

    /// Origin node (lookup only)
    pub node_id: NodeId,
    pub node_keyword: String,

    pub title: String,

    /// Result snippet at collection time
    pub content: String,
    pub url: String,

    /// When the item was collected
    pub timestamp: DateTime<Utc>,
}

impl CollectedItem {
    /// Snapshot result `result_index` of `node`
    ///
    /// Returns `None` when the node has no result at that index.
    #[must_use]
    pub fn from_node(node: &SearchNode, result_index: usize, at: DateTime<Utc>) -> Option<Self> {
        let result = node.result(result_index)?;
        Some(Self {
            id: CollectionId::derive(&node.id, result_index),
            node_id: node.id.clone(),
            node_keyword: node.keyword.clone(),
            title: result.title.clone(),
            content: result.snippet.clone(),
            url: result.url.clone(),
            timestamp: at,
        })
    }
}
