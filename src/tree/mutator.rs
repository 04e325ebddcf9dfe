//! Localized, copy-on-path edits of the forest
//!
//! [`locate_and_replace`] finds a node by identity and swaps in the value
//! produced by a transform. Only the nodes on the path from the root to the
//! target are rebuilt; every other subtree is carried over by pointer, so two
//! edits against disjoint nodes commute when each is derived from the latest
//! forest.
//!
//! The transforms used by the session are methods on [`SearchNode`] below.
//! None of them mutate in place.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::forest::Forest;
use super::node::{NodeId, NodeStatus, SearchNode, SearchPayload};

/// Replace the node with id `target` by `transform(node)`
///
/// An unknown `target` is not an error: the returned forest is equal to (and
/// shares every root with) the input.
pub fn locate_and_replace<F>(forest: &Forest, target: &NodeId, transform: F) -> Forest
where
    F: FnOnce(&SearchNode) -> SearchNode,
{
    locate_and_replace_reporting(forest, target, transform).0
}

/// Like [`locate_and_replace`], also reporting whether `target` was found
pub fn locate_and_replace_reporting<F>(
    forest: &Forest,
    target: &NodeId,
    transform: F,
) -> (Forest, bool)
where
    F: FnOnce(&SearchNode) -> SearchNode,
{
    let mut transform = Some(transform);
    match replace_in(forest.roots(), target, &mut transform) {
        Some(roots) => (Forest::from_roots(roots), true),
        None => {
            tracing::debug!(node_id = %target, "Replace target not found, forest unchanged");
            (forest.clone(), false)
        }
    }
}

/// Returns the rebuilt sibling list when `target` lives somewhere under `nodes`
fn replace_in<F>(
    nodes: &[Arc<SearchNode>],
    target: &NodeId,
    transform: &mut Option<F>,
) -> Option<Vec<Arc<SearchNode>>>
where
    F: FnOnce(&SearchNode) -> SearchNode,
{
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == *target {
            transform.take().map(|apply| {
                let next = apply(node);
                debug_assert_eq!(next.id, node.id, "transforms must keep the node id");
                Arc::new(next)
            })
        } else {
            replace_in(&node.children, target, transform).map(|children| {
                let mut parent = SearchNode::clone(node);
                parent.children = children;
                Arc::new(parent)
            })
        };

        if let Some(replacement) = replacement {
            let mut rebuilt = nodes.to_vec();
            rebuilt[index] = replacement;
            return Some(rebuilt);
        }
    }
    None
}

impl SearchNode {
    /// Append `child` after the existing children (expand)
    #[must_use]
    pub fn with_child(&self, child: SearchNode) -> SearchNode {
        let mut next = self.clone();
        next.children.push(Arc::new(child));
        next
    }

    /// Flip the result-visibility flag
    #[must_use]
    pub fn toggled(&self) -> SearchNode {
        let mut next = self.clone();
        next.is_expanded = !next.is_expanded;
        next
    }

    /// Mark a request as in flight for this node
    #[must_use]
    pub fn marked_busy(&self, status: NodeStatus) -> SearchNode {
        let mut next = self.clone();
        next.status = status;
        next
    }

    /// Replace results and follow-ups after a successful refresh
    ///
    /// Id, keyword, children, source and visibility are kept.
    #[must_use]
    pub fn refreshed(&self, payload: SearchPayload, at: DateTime<Utc>) -> SearchNode {
        let mut next = self.clone();
        next.search_results = payload.results;
        next.generated_keywords = payload.generated_keywords;
        next.timestamp = at;
        next.status = NodeStatus::Ready;
        next
    }

    /// Clear the in-flight status, leaving all data as it was
    #[must_use]
    pub fn settled(&self) -> SearchNode {
        self.marked_busy(NodeStatus::Ready)
    }
}
