//! Flat, insertion-ordered ledger of collected items

use ahash::AHashSet;
use serde::Serialize;

use super::types::{CollectedItem, CollectionId};
use crate::backend::IntegrationContent;

/// Collected items in the order the user collected them
///
/// At most one entry per [`CollectionId`]. Operations take the ledger by
/// value and hand back the next ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionLedger {
    items: Vec<CollectedItem>,
    #[serde(skip)]
    ids: AHashSet<CollectionId>,
}

/// First few items plus how many were left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerPreview<'a> {
    pub shown: &'a [CollectedItem],
    pub remaining: usize,
}

impl CollectionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless an entry with the same id is already present
    #[must_use]
    pub fn collect(mut self, item: CollectedItem) -> Self {
        if self.ids.insert(item.id.clone()) {
            log::debug!("Collected {} from '{}'", item.id, item.node_keyword);
            self.items.push(item);
        } else {
            log::debug!("Item {} already collected, ledger unchanged", item.id);
        }
        self
    }

    /// Remove the entry with `id`, if present
    #[must_use]
    pub fn uncollect(mut self, id: &CollectionId) -> Self {
        if self.ids.remove(id) {
            self.items.retain(|item| item.id != *id);
            log::debug!("Uncollected {id}");
        }
        self
    }

    #[must_use]
    pub fn contains(&self, id: &CollectionId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn get(&self, id: &CollectionId) -> Option<&CollectedItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    #[must_use]
    pub fn items(&self) -> &[CollectedItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first `limit` items and the count of the rest
    #[must_use]
    pub fn preview(&self, limit: usize) -> LedgerPreview<'_> {
        let shown = &self.items[..self.items.len().min(limit)];
        LedgerPreview {
            shown,
            remaining: self.items.len() - shown.len(),
        }
    }

    /// Title/content pairs for the integration endpoint
    #[must_use]
    pub fn to_integration_contents(&self) -> Vec<IntegrationContent> {
        self.items
            .iter()
            .map(|item| IntegrationContent {
                title: item.title.clone(),
                content: item.content.clone(),
            })
            .collect()
    }
}
