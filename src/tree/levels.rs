//! Depth-grouped projection of the forest for tiered display

use serde::Serialize;
use std::sync::Arc;

use super::forest::Forest;
use super::node::{NodeId, SearchNode};

/// A node placed in a tier, with the id of the node it was expanded from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelItem {
    pub node: Arc<SearchNode>,
    pub parent_id: Option<NodeId>,
}

/// All nodes at one depth, in left-to-right order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub depth: usize,
    pub items: Vec<LevelItem>,
}

impl Level {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Group every node of `forest` by depth
///
/// Roots are depth 0. Inside a tier, items follow a pre-order walk of the
/// forest, so children of the first root come before children of the second.
/// An empty forest yields no tiers at all.
#[must_use]
pub fn project(forest: &Forest) -> Vec<Level> {
    let mut levels: Vec<Level> = Vec::new();

    for visit in forest.walk() {
        while levels.len() <= visit.depth {
            levels.push(Level {
                depth: levels.len(),
                items: Vec::new(),
            });
        }
        levels[visit.depth].items.push(LevelItem {
            node: Arc::clone(visit.node),
            parent_id: visit.parent.cloned(),
        });
    }

    levels
}
