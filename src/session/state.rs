//! The single state cell owned by a session
//!
//! All writes go through [`crate::session::SearchSession::apply`], which holds
//! the lock only for the duration of a synchronous closure. Completions of
//! independent requests therefore apply their edits one at a time, each
//! derived from the forest as it is at that moment.

use ahash::AHashSet;
use std::sync::Arc;

use super::errors::{SessionError, SessionResult};
use crate::collection::CollectionLedger;
use crate::tree::{Forest, NodeId, NodeStatus, SearchNode, locate_and_replace_reporting};

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) forest: Forest,
    pub(crate) ledger: CollectionLedger,
    /// Nodes with a refresh or expand outstanding
    pub(crate) in_flight: AHashSet<NodeId>,
}

impl SessionState {
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    #[must_use]
    pub fn ledger(&self) -> &CollectionLedger {
        &self.ledger
    }

    #[must_use]
    pub fn is_in_flight(&self, id: &NodeId) -> bool {
        self.in_flight.contains(id)
    }

    /// Swap in `transform(node)` for node `id`; false if `id` is not in the forest
    pub fn replace_node<F>(&mut self, id: &NodeId, transform: F) -> bool
    where
        F: FnOnce(&SearchNode) -> SearchNode,
    {
        let (forest, found) = locate_and_replace_reporting(&self.forest, id, transform);
        self.forest = forest;
        found
    }

    /// Reserve node `id` for one request and show it as busy
    ///
    /// Returns the node as it was before marking, `Ok(None)` when it is not in
    /// the forest, or `NodeBusy` when another request already holds it.
    pub(crate) fn claim(
        &mut self,
        id: &NodeId,
        status: NodeStatus,
    ) -> SessionResult<Option<Arc<SearchNode>>> {
        let Some(node) = self.forest.find(id).cloned() else {
            return Ok(None);
        };
        if !self.in_flight.insert(id.clone()) {
            return Err(SessionError::NodeBusy(id.clone()));
        }
        self.replace_node(id, |node| node.marked_busy(status));
        Ok(Some(node))
    }

    /// Give back the reservation taken by [`Self::claim`]
    pub(crate) fn release(&mut self, id: &NodeId) {
        self.in_flight.remove(id);
    }
}
