//! Ordered collection of root nodes
//!
//! Roots and children are shared through `Arc`, so cloning a `Forest` only
//! clones the root vector. Edits go through [`crate::tree::locate_and_replace`],
//! which rebuilds the spine from the root to the edited node and reuses every
//! other subtree by pointer.

use serde::Serialize;
use std::sync::Arc;

use super::node::{NodeId, SearchNode};

/// The user's top-level explorations, one root per initial search
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Arc<SearchNode>>,
}

impl Forest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_roots(roots: Vec<Arc<SearchNode>>) -> Self {
        Self { roots }
    }

    #[must_use]
    pub fn roots(&self) -> &[Arc<SearchNode>] {
        &self.roots
    }

    /// Number of roots
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// New forest with `node` appended as the last root
    #[must_use]
    pub fn with_root(&self, node: SearchNode) -> Self {
        let mut roots = self.roots.clone();
        roots.push(Arc::new(node));
        Self { roots }
    }

    /// Find a node anywhere in the forest
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&Arc<SearchNode>> {
        self.walk().find(|visit| visit.node.id == *id).map(|visit| visit.node)
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Total number of nodes across all trees
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Every node id in pre-order
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        self.walk().map(|visit| visit.node.id.clone()).collect()
    }

    /// Pre-order traversal: roots left to right, each node before its children
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        let stack = self
            .roots
            .iter()
            .rev()
            .map(|node| Visit {
                node,
                depth: 0,
                parent: None,
            })
            .collect();
        Walk { stack }
    }
}

/// One step of a [`Walk`]
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a Arc<SearchNode>,
    pub depth: usize,
    pub parent: Option<&'a NodeId>,
}

/// Iterative pre-order walk over a forest
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        let node: &'a SearchNode = visit.node;
        let depth = visit.depth + 1;
        // Reverse push so the first child is popped first
        self.stack
            .extend(node.children.iter().rev().map(move |child| Visit {
                node: child,
                depth,
                parent: Some(&node.id),
            }));
        Some(visit)
    }
}
